//! Dataset card generation.
//!
//! A card is a `README.md` with a YAML front-matter block (license, tags,
//! task categories) followed by a human-readable body. Optional card fields
//! are kept sparse: an unset field never appears in the rendered card, and
//! [`CardMetadata::to_map`] keeps that distinction testable in one place.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dataset::DatasetInfo;
use crate::error::HubloadError;

/// Tag attached to every published episode dataset.
const DATASET_TAG: &str = "LeRobot";

/// Optional card fields supplied on the command line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardMetadata {
    pub description: Option<String>,
    pub paper_url: Option<String>,
    pub homepage: Option<String>,
}

impl CardMetadata {
    pub fn new(
        description: Option<String>,
        paper_url: Option<String>,
        homepage: Option<String>,
    ) -> Self {
        CardMetadata {
            description,
            paper_url,
            homepage,
        }
    }

    /// Sparse view: only the fields that were actually set, keyed by the
    /// card field name. Unset fields are omitted entirely, never emitted as
    /// empty values.
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        let mut map = BTreeMap::new();
        if let Some(description) = &self.description {
            map.insert("description", description.clone());
        }
        if let Some(paper_url) = &self.paper_url {
            map.insert("paper_url", paper_url.clone());
        }
        if let Some(homepage) = &self.homepage {
            map.insert("homepage", homepage.clone());
        }
        map
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.paper_url.is_none() && self.homepage.is_none()
    }
}

#[derive(Serialize)]
struct CardFrontMatter<'a> {
    license: &'a str,
    tags: Vec<&'a str>,
    task_categories: [&'a str; 1],
}

/// Render the full dataset card markdown.
pub fn render_card(
    repo_id: &str,
    info: &DatasetInfo,
    license: &str,
    tags: &[String],
    metadata: &CardMetadata,
) -> Result<String, HubloadError> {
    let mut card_tags = vec![DATASET_TAG];
    card_tags.extend(tags.iter().map(String::as_str));

    let front_matter = CardFrontMatter {
        license,
        tags: card_tags,
        task_categories: ["robotics"],
    };
    let front_matter =
        serde_yaml::to_string(&front_matter).map_err(|source| HubloadError::CardRender {
            message: source.to_string(),
        })?;

    let mut body = String::new();
    body.push_str(&format!("# {repo_id}\n"));

    if let Some(description) = &metadata.description {
        body.push_str(&format!("\n{description}\n"));
    }

    body.push_str("\n## Dataset Structure\n\n");
    if let Some(robot_type) = &info.robot_type {
        body.push_str(&format!("- **Robot type:** {robot_type}\n"));
    }
    body.push_str(&format!("- **Episodes:** {}\n", info.total_episodes));
    body.push_str(&format!("- **Frames:** {}\n", info.total_frames));
    if let Some(fps) = info.fps {
        body.push_str(&format!("- **FPS:** {fps}\n"));
    }
    body.push_str(&format!("- **Format version:** {}\n", info.codebase_version));

    if metadata.paper_url.is_some() || metadata.homepage.is_some() {
        body.push_str("\n## Links\n\n");
        if let Some(paper_url) = &metadata.paper_url {
            body.push_str(&format!("- **Paper:** {paper_url}\n"));
        }
        if let Some(homepage) = &metadata.homepage {
            body.push_str(&format!("- **Homepage:** {homepage}\n"));
        }
    }

    Ok(format!("---\n{front_matter}---\n\n{body}"))
}
