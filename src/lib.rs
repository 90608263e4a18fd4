//! Hubload: push locally recorded episode datasets to the Hugging Face Hub.
//!
//! Hubload takes a dataset recorded to local disk (the `meta/` + `data/` +
//! `videos/` episode layout), generates a dataset card from supplied
//! metadata, and publishes everything to a dataset repository on the Hub in
//! one best-effort pass.
//!
//! # Modules
//!
//! - [`dataset`]: local dataset repository (root resolution, metadata, inventory)
//! - [`hub`]: repo-id resolution, the Hub HTTP client, and the publish sequence
//! - [`card`]: dataset card metadata and rendering
//! - [`error`]: error types for hubload operations

pub mod card;
pub mod dataset;
pub mod error;
pub mod hub;
pub mod logging;

use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use card::CardMetadata;
use dataset::LocalDataset;
use hub::client::{HttpHubClient, HubClient};
use hub::publish::{push_dataset, PublishOptions};

pub use error::HubloadError;

/// The hubload CLI application.
#[derive(Parser)]
#[command(name = "hubload")]
#[command(version, about = "Upload an episode dataset to the Hugging Face Hub")]
struct Cli {
    /// The repository ID on the Hub (e.g. "username/dataset-name").
    #[arg(long)]
    repo_id: String,

    /// Local directory containing the dataset. If not specified, uses the
    /// default cache directory.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Branch name to upload to. If not specified, uses the default branch.
    #[arg(long)]
    branch: Option<String>,

    /// List of tags to add to the dataset.
    #[arg(long, num_args = 1..)]
    tags: Option<Vec<String>>,

    /// License for the dataset.
    #[arg(long, default_value = "apache-2.0")]
    license: String,

    /// Make the repository private.
    #[arg(long)]
    private: bool,

    /// Skip uploading video files.
    #[arg(long)]
    no_push_videos: bool,

    /// Use the batched large-folder upload strategy.
    #[arg(long)]
    large_folder: bool,

    /// Description to add to the dataset card.
    #[arg(long)]
    description: Option<String>,

    /// URL of the paper associated with this dataset.
    #[arg(long)]
    paper_url: Option<String>,

    /// Homepage URL for the dataset.
    #[arg(long)]
    homepage: Option<String>,
}

/// Validated upload configuration, one per invocation.
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub repo_id: String,
    pub root: Option<PathBuf>,
    pub branch: Option<String>,
    pub tags: Vec<String>,
    pub license: String,
    pub private: bool,
    pub push_videos: bool,
    pub large_folder: bool,
    pub card: CardMetadata,
}

impl UploadConfig {
    /// Check the preconditions that must hold before any load or upload:
    /// the repo id grammar, and the existence of an explicitly given root.
    pub fn validate(mut self) -> Result<Self, HubloadError> {
        let repo = hub::resolve::parse_repo_input(&self.repo_id, self.branch.as_deref())?;
        self.repo_id = repo.repo_id;

        if let Some(root) = &self.root {
            if !root.exists() {
                return Err(HubloadError::MissingLocalPath { path: root.clone() });
            }
        }

        Ok(self)
    }
}

impl From<Cli> for UploadConfig {
    fn from(cli: Cli) -> Self {
        UploadConfig {
            repo_id: cli.repo_id,
            root: cli.root,
            branch: cli.branch,
            tags: cli.tags.unwrap_or_default(),
            license: cli.license,
            private: cli.private,
            push_videos: !cli.no_push_videos,
            large_folder: cli.large_folder,
            card: CardMetadata::new(cli.description, cli.paper_url, cli.homepage),
        }
    }
}

/// Run the hubload CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), HubloadError> {
    let config = UploadConfig::from(Cli::parse()).validate()?;
    let client = HttpHubClient::new();
    execute(&config, &client)
}

/// Load the dataset named by a validated config and publish it.
///
/// The caller supplies the hub client so the whole sequence stays testable
/// without a network.
pub fn execute(config: &UploadConfig, client: &dyn HubClient) -> Result<(), HubloadError> {
    match &config.root {
        Some(root) => info!("Loading dataset from {}", root.display()),
        None => info!("Loading dataset from default cache directory"),
    }
    let dataset = LocalDataset::load(&config.repo_id, config.root.as_deref())?;

    let options = PublishOptions {
        branch: config.branch.clone(),
        tags: config.tags.clone(),
        license: config.license.clone(),
        tag_version: true,
        push_videos: config.push_videos,
        private: config.private,
        upload_large_folder: config.large_folder,
        card: config.card.clone(),
    };

    info!("Pushing dataset to the Hub: {}", config.repo_id);
    match push_dataset(&dataset, client, &options) {
        Ok(()) => {
            info!("Dataset upload completed successfully!");
            Ok(())
        }
        Err(error) => {
            error!("Error uploading dataset: {error}");
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> UploadConfig {
        UploadConfig::from(Cli::try_parse_from(args).expect("parse"))
    }

    #[test]
    fn defaults_match_contract() {
        let config = parse(&["hubload", "--repo-id", "alice/ds"]);
        assert_eq!(config.license, "apache-2.0");
        assert!(config.push_videos);
        assert!(!config.private);
        assert!(!config.large_folder);
        assert!(config.tags.is_empty());
        assert!(config.card.is_empty());
        assert!(config.root.is_none());
        assert!(config.branch.is_none());
    }

    #[test]
    fn no_push_videos_inverts_flag() {
        let config = parse(&["hubload", "--repo-id", "a/b", "--no-push-videos"]);
        assert!(!config.push_videos);
    }

    #[test]
    fn tags_accept_multiple_values() {
        let config = parse(&["hubload", "--repo-id", "a/b", "--tags", "x", "y"]);
        assert_eq!(config.tags, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn card_fields_flow_into_metadata() {
        let config = parse(&[
            "hubload",
            "--repo-id",
            "a/b",
            "--paper-url",
            "https://example.org/p",
        ]);
        let map = config.card.to_map();
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get("paper_url").map(String::as_str),
            Some("https://example.org/p")
        );
    }

    #[test]
    fn missing_repo_id_fails_to_parse() {
        assert!(Cli::try_parse_from(["hubload"]).is_err());
    }

    #[test]
    fn validate_accepts_well_formed_id_without_root() {
        let config = parse(&["hubload", "--repo-id", "alice/ds"]);
        assert!(config.validate().is_ok());
    }
}
