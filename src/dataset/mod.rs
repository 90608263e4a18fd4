//! Local episode dataset repository.
//!
//! A recorded dataset lives in one directory with a fixed layout:
//!
//! ```text
//! <root>/
//!   meta/info.json        dataset-level metadata (version, counts, fps)
//!   meta/...              episode and task index files
//!   data/...              per-episode tabular data
//!   videos/...            per-camera encoded video, optional at upload time
//! ```
//!
//! Loading resolves the root (explicit, or the default cache location under
//! the Hugging Face home), decodes `meta/info.json`, and exposes the file
//! inventory the publish sequence commits.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::HubloadError;
use crate::hub::client::CommitFile;

pub const INFO_PATH: &str = "meta/info.json";
pub const VIDEOS_DIR: &str = "videos";
pub const CARD_NAME: &str = "README.md";

/// Decoded subset of `meta/info.json`. Unknown fields are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct DatasetInfo {
    /// Version of the recording format, used as the published version tag.
    pub codebase_version: String,
    #[serde(default)]
    pub robot_type: Option<String>,
    #[serde(default)]
    pub total_episodes: u64,
    #[serde(default)]
    pub total_frames: u64,
    #[serde(default)]
    pub fps: Option<f64>,
}

/// Handle to a dataset on local disk, created once per run and consumed by
/// the publish sequence.
#[derive(Clone, Debug)]
pub struct LocalDataset {
    pub repo_id: String,
    pub root: PathBuf,
    pub info: DatasetInfo,
}

impl LocalDataset {
    /// Open the dataset for `repo_id`, reading from `root` when given and
    /// from the default cache location otherwise.
    pub fn load(repo_id: &str, root: Option<&Path>) -> Result<Self, HubloadError> {
        let root = match root {
            Some(path) => path.to_path_buf(),
            None => default_root(repo_id),
        };

        if !root.is_dir() {
            return Err(HubloadError::DatasetNotFound {
                repo_id: repo_id.to_string(),
                root,
                message: "directory does not exist".to_string(),
            });
        }

        let info_path = root.join(INFO_PATH);
        let raw = std::fs::read_to_string(&info_path).map_err(|_| {
            HubloadError::DatasetNotFound {
                repo_id: repo_id.to_string(),
                root: root.clone(),
                message: format!("missing {INFO_PATH}"),
            }
        })?;
        let info: DatasetInfo =
            serde_json::from_str(&raw).map_err(|source| HubloadError::MetadataParse {
                path: info_path,
                source,
            })?;

        Ok(LocalDataset {
            repo_id: repo_id.to_string(),
            root,
            info,
        })
    }

    /// Enumerate the files to upload as sorted repo-relative commit entries.
    ///
    /// Hidden files and any previously generated card are skipped (the card
    /// is regenerated at publish time). With `push_videos` false the whole
    /// `videos/` subtree is skipped as well.
    pub fn upload_inventory(&self, push_videos: bool) -> Result<Vec<CommitFile>, HubloadError> {
        let mut files = Vec::new();

        for entry in walkdir::WalkDir::new(&self.root) {
            let entry = entry.map_err(|source| {
                HubloadError::Io(source.into_io_error().unwrap_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::Other, "walk error")
                }))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .expect("walkdir yields paths under the walk root");
            let repo_path = repo_relative(relative);

            if is_hidden(relative) || repo_path == CARD_NAME {
                continue;
            }
            if !push_videos && repo_path.starts_with(&format!("{VIDEOS_DIR}/")) {
                continue;
            }

            files.push(CommitFile::local(repo_path, entry.path()));
        }

        files.sort_by(|a, b| a.repo_path.cmp(&b.repo_path));
        Ok(files)
    }
}

/// Default dataset location: `<hf home>/lerobot/<repo_id>`.
fn default_root(repo_id: &str) -> PathBuf {
    let cache = hf_hub::Cache::default();
    let hf_home = cache
        .path()
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cache.path().clone());
    hf_home.join("lerobot").join(repo_id)
}

fn repo_relative(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_hidden(relative: &Path) -> bool {
    relative.components().any(|component| {
        component
            .as_os_str()
            .to_string_lossy()
            .starts_with('.')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    fn sample_info() -> &'static str {
        r#"{
            "codebase_version": "v2.1",
            "robot_type": "so100",
            "total_episodes": 2,
            "total_frames": 400,
            "fps": 30
        }"#
    }

    #[test]
    fn load_reads_info_json() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "meta/info.json", sample_info());

        let dataset = LocalDataset::load("alice/my-dataset", Some(dir.path())).expect("load");
        assert_eq!(dataset.info.codebase_version, "v2.1");
        assert_eq!(dataset.info.robot_type.as_deref(), Some("so100"));
        assert_eq!(dataset.info.total_episodes, 2);
    }

    #[test]
    fn load_missing_directory_fails() {
        let err = LocalDataset::load("alice/ds", Some(Path::new("/definitely/not/here")))
            .expect_err("should fail");
        assert!(matches!(err, HubloadError::DatasetNotFound { .. }));
    }

    #[test]
    fn load_missing_info_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalDataset::load("alice/ds", Some(dir.path())).expect_err("should fail");
        match err {
            HubloadError::DatasetNotFound { message, .. } => {
                assert!(message.contains("meta/info.json"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_invalid_info_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "meta/info.json", "{not json");
        let err = LocalDataset::load("alice/ds", Some(dir.path())).expect_err("should fail");
        assert!(matches!(err, HubloadError::MetadataParse { .. }));
    }

    #[test]
    fn inventory_is_sorted_and_skips_hidden_and_card() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "meta/info.json", sample_info());
        write_file(dir.path(), "data/chunk-000/episode_000001.parquet", "b");
        write_file(dir.path(), "data/chunk-000/episode_000000.parquet", "a");
        write_file(dir.path(), "README.md", "stale card");
        write_file(dir.path(), ".gitattributes", "ignored");

        let dataset = LocalDataset::load("alice/ds", Some(dir.path())).unwrap();
        let inventory = dataset.upload_inventory(true).unwrap();
        let paths: Vec<&str> = inventory
            .iter()
            .map(|file| file.repo_path.as_str())
            .collect();

        assert_eq!(
            paths,
            vec![
                "data/chunk-000/episode_000000.parquet",
                "data/chunk-000/episode_000001.parquet",
                "meta/info.json",
            ]
        );
    }

    #[test]
    fn inventory_skips_videos_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "meta/info.json", sample_info());
        write_file(dir.path(), "data/chunk-000/episode_000000.parquet", "a");
        write_file(
            dir.path(),
            "videos/chunk-000/observation.images.top/episode_000000.mp4",
            "v",
        );

        let dataset = LocalDataset::load("alice/ds", Some(dir.path())).unwrap();

        let with_videos = dataset.upload_inventory(true).unwrap();
        assert!(with_videos
            .iter()
            .any(|file| file.repo_path.starts_with("videos/")));

        let without_videos = dataset.upload_inventory(false).unwrap();
        assert!(without_videos
            .iter()
            .all(|file| !file.repo_path.starts_with("videos/")));
    }
}
