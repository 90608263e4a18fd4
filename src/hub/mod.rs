//! Hugging Face Hub orchestration.
//!
//! This module owns remote-specific concerns (repo-id resolution, the HTTP
//! client, and the publish sequence). Local dataset reading stays in
//! `crate::dataset`.

pub mod client;
pub mod publish;
pub mod resolve;

/// Canonical reference to a Hub dataset repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HubRepoRef {
    pub repo_id: String,
    pub branch: Option<String>,
}
