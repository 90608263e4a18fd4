//! The publish sequence: one best-effort upload attempt per invocation.
//!
//! Failures propagate unmodified. There are no retries and no cleanup of
//! whatever partial state an interrupted upload left on the remote.

use log::debug;

use crate::card::{render_card, CardMetadata};
use crate::dataset::{LocalDataset, CARD_NAME};
use crate::error::HubloadError;

use super::client::{CommitFile, HubClient};

pub const DEFAULT_REVISION: &str = "main";

/// Files per commit in large-folder mode.
pub const LARGE_FOLDER_BATCH: usize = 50;

/// Everything the publish sequence needs beyond the dataset itself.
#[derive(Clone, Debug)]
pub struct PublishOptions {
    pub branch: Option<String>,
    pub tags: Vec<String>,
    pub license: String,
    pub tag_version: bool,
    pub push_videos: bool,
    pub private: bool,
    pub upload_large_folder: bool,
    pub card: CardMetadata,
}

impl Default for PublishOptions {
    fn default() -> Self {
        PublishOptions {
            branch: None,
            tags: Vec::new(),
            license: "apache-2.0".to_string(),
            tag_version: true,
            push_videos: true,
            private: false,
            upload_large_folder: false,
            card: CardMetadata::default(),
        }
    }
}

/// Push a loaded dataset to the Hub.
///
/// Sequence: create the repo, create the target branch when requested,
/// commit the file inventory (one commit, or bounded batches in
/// large-folder mode), commit the regenerated dataset card, and finally
/// tag the revision with the dataset's format version.
pub fn push_dataset(
    dataset: &LocalDataset,
    client: &dyn HubClient,
    options: &PublishOptions,
) -> Result<(), HubloadError> {
    client.create_repo(&dataset.repo_id, options.private)?;

    let revision = options.branch.as_deref().unwrap_or(DEFAULT_REVISION);
    if let Some(branch) = options.branch.as_deref() {
        client.create_branch(&dataset.repo_id, branch)?;
    }

    let inventory = dataset.upload_inventory(options.push_videos)?;
    debug!(
        "Staging {} file(s) from {}",
        inventory.len(),
        dataset.root.display()
    );

    let batches = commit_batches(&inventory, options.upload_large_folder);
    let total = batches.len();
    for (index, batch) in batches.iter().enumerate() {
        let message = if total == 1 {
            "Upload dataset".to_string()
        } else {
            format!("Upload dataset (part {}/{})", index + 1, total)
        };
        debug!("Committing {} file(s): {}", batch.len(), message);
        client.commit_files(&dataset.repo_id, revision, &message, batch)?;
    }

    let card = render_card(
        &dataset.repo_id,
        &dataset.info,
        &options.license,
        &options.tags,
        &options.card,
    )?;
    client.commit_files(
        &dataset.repo_id,
        revision,
        "Upload dataset card",
        &[CommitFile::inline(CARD_NAME, card.into_bytes())],
    )?;

    if options.tag_version {
        client.create_tag(&dataset.repo_id, &dataset.info.codebase_version, revision)?;
    }

    Ok(())
}

fn commit_batches(files: &[CommitFile], large_folder: bool) -> Vec<&[CommitFile]> {
    if files.is_empty() {
        return Vec::new();
    }
    if large_folder {
        files.chunks(LARGE_FOLDER_BATCH).collect()
    } else {
        vec![files]
    }
}
