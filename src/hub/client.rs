use std::path::PathBuf;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::json;

use crate::error::HubloadError;

/// Default Hub endpoint. Overridable for tests and private deployments.
pub const HUB_ENDPOINT: &str = "https://huggingface.co";

/// Where a staged file's bytes come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommitContent {
    /// Read from a file on disk at commit time.
    Local(PathBuf),
    /// Already in memory (generated content such as the dataset card).
    Inline(Vec<u8>),
}

/// A file staged for upload: repo-relative destination plus its content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitFile {
    pub repo_path: String,
    pub content: CommitContent,
}

impl CommitFile {
    pub fn local(repo_path: impl Into<String>, local_path: impl Into<PathBuf>) -> Self {
        CommitFile {
            repo_path: repo_path.into(),
            content: CommitContent::Local(local_path.into()),
        }
    }

    pub fn inline(repo_path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        CommitFile {
            repo_path: repo_path.into(),
            content: CommitContent::Inline(bytes.into()),
        }
    }
}

/// Operations the publish sequence needs from the Hub.
///
/// The orchestrator in `crate::hub::publish` only ever talks to this trait;
/// tests substitute a recording implementation.
pub trait HubClient {
    /// Create the dataset repository if it does not already exist.
    fn create_repo(&self, repo_id: &str, private: bool) -> Result<(), HubloadError>;

    /// Create a branch if it does not already exist.
    fn create_branch(&self, repo_id: &str, branch: &str) -> Result<(), HubloadError>;

    /// Commit a set of files to a revision in one atomic operation.
    fn commit_files(
        &self,
        repo_id: &str,
        revision: &str,
        message: &str,
        files: &[CommitFile],
    ) -> Result<(), HubloadError>;

    /// Tag a revision, replacing nothing if the tag already exists.
    fn create_tag(&self, repo_id: &str, tag: &str, revision: &str) -> Result<(), HubloadError>;
}

/// `HubClient` speaking the Hub HTTP API over a blocking agent.
pub struct HttpHubClient {
    agent: ureq::Agent,
    endpoint: String,
    token: Option<String>,
}

impl HttpHubClient {
    /// Build a client against the public Hub endpoint.
    ///
    /// The access token comes from `HF_TOKEN` when set, otherwise from the
    /// hf-hub token cache (`~/.cache/huggingface/token`).
    pub fn new() -> Self {
        Self::with_endpoint(HUB_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(600)))
            .build();
        let agent: ureq::Agent = config.into();

        let token = std::env::var("HF_TOKEN")
            .ok()
            .or_else(|| hf_hub::Cache::default().token());

        HttpHubClient {
            agent,
            endpoint: endpoint.into(),
            token,
        }
    }

    fn api_url(&self, repo_id: &str, segments: &[&str]) -> Result<url::Url, HubloadError> {
        let mut url =
            url::Url::parse(&self.endpoint).map_err(|source| HubloadError::HubApi {
                repo_id: repo_id.to_string(),
                message: format!("invalid endpoint '{}': {}", self.endpoint, source),
            })?;
        url.path_segments_mut()
            .map_err(|_| HubloadError::HubApi {
                repo_id: repo_id.to_string(),
                message: format!("endpoint '{}' cannot be a base URL", self.endpoint),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn post_json(
        &self,
        repo_id: &str,
        url: &url::Url,
        payload: &serde_json::Value,
    ) -> Result<(), HubloadError> {
        let mut request = self.agent.post(url.as_str());
        if let Some(token) = self.token.as_deref() {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }

        match request.send_json(payload) {
            Ok(_) => Ok(()),
            // Already exists. Repos, branches, and tags are all create-if-absent.
            Err(ureq::Error::StatusCode(409)) => Ok(()),
            Err(source) => Err(HubloadError::HubApi {
                repo_id: repo_id.to_string(),
                message: source.to_string(),
            }),
        }
    }
}

impl Default for HttpHubClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HubClient for HttpHubClient {
    fn create_repo(&self, repo_id: &str, private: bool) -> Result<(), HubloadError> {
        let (namespace, name) = split_repo_id(repo_id)?;

        let url = self.api_url(repo_id, &["api", "repos", "create"])?;
        let payload = json!({
            "type": "dataset",
            "name": name,
            "organization": namespace,
            "private": private,
        });
        self.post_json(repo_id, &url, &payload)
    }

    fn create_branch(&self, repo_id: &str, branch: &str) -> Result<(), HubloadError> {
        let (namespace, name) = split_repo_id(repo_id)?;
        let url = self.api_url(repo_id, &["api", "datasets", namespace, name, "branch", branch])?;
        self.post_json(repo_id, &url, &json!({}))
    }

    fn commit_files(
        &self,
        repo_id: &str,
        revision: &str,
        message: &str,
        files: &[CommitFile],
    ) -> Result<(), HubloadError> {
        let (namespace, name) = split_repo_id(repo_id)?;
        let url = self.api_url(repo_id, &["api", "datasets", namespace, name, "commit", revision])?;

        let mut body = String::new();
        let header = json!({"key": "header", "value": {"summary": message}});
        body.push_str(&header.to_string());
        body.push('\n');

        for file in files {
            let bytes = match &file.content {
                CommitContent::Local(path) => std::fs::read(path)?,
                CommitContent::Inline(bytes) => bytes.clone(),
            };
            let line = json!({
                "key": "file",
                "value": {
                    "path": file.repo_path,
                    "content": BASE64.encode(&bytes),
                    "encoding": "base64",
                }
            });
            body.push_str(&line.to_string());
            body.push('\n');
        }

        let mut request = self
            .agent
            .post(url.as_str())
            .header("Content-Type", "application/x-ndjson");
        if let Some(token) = self.token.as_deref() {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }

        request
            .send(body.as_bytes())
            .map(|_| ())
            .map_err(|source| HubloadError::HubApi {
                repo_id: repo_id.to_string(),
                message: source.to_string(),
            })
    }

    fn create_tag(&self, repo_id: &str, tag: &str, revision: &str) -> Result<(), HubloadError> {
        let (namespace, name) = split_repo_id(repo_id)?;
        let url = self.api_url(repo_id, &["api", "datasets", namespace, name, "tag", revision])?;
        self.post_json(repo_id, &url, &json!({"tag": tag}))
    }
}

fn split_repo_id(repo_id: &str) -> Result<(&str, &str), HubloadError> {
    repo_id
        .split_once('/')
        .ok_or_else(|| HubloadError::InvalidIdentifier {
            input: repo_id.to_string(),
            message: "expected repo id in '<namespace>/<dataset>' form".to_string(),
        })
}
