use crate::error::HubloadError;

use super::HubRepoRef;

/// Parse a user-supplied dataset reference (repo ID or dataset URL).
pub fn parse_repo_input(input: &str, branch: Option<&str>) -> Result<HubRepoRef, HubloadError> {
    let repo_id = if input.starts_with("http://") || input.starts_with("https://") {
        parse_repo_id_from_url(input)?
    } else {
        validate_repo_id(input)?
    };

    Ok(HubRepoRef {
        repo_id,
        branch: branch.map(str::to_string),
    })
}

fn parse_repo_id_from_url(input: &str) -> Result<String, HubloadError> {
    let url = url::Url::parse(input).map_err(|source| HubloadError::InvalidIdentifier {
        input: input.to_string(),
        message: format!("invalid URL: {source}"),
    })?;

    let host = url
        .host_str()
        .ok_or_else(|| HubloadError::InvalidIdentifier {
            input: input.to_string(),
            message: "URL is missing a host".to_string(),
        })?
        .to_ascii_lowercase();

    if host != "huggingface.co" {
        return Err(HubloadError::InvalidIdentifier {
            input: input.to_string(),
            message: format!("expected host 'huggingface.co', found '{}'", host),
        });
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|iter| iter.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    if segments.len() < 3 || segments[0] != "datasets" {
        return Err(HubloadError::InvalidIdentifier {
            input: input.to_string(),
            message:
                "expected dataset URL like https://huggingface.co/datasets/<namespace>/<dataset>"
                    .to_string(),
        });
    }

    validate_repo_id(&format!("{}/{}", segments[1], segments[2]))
}

/// Check that a repo ID has the `<namespace>/<dataset>` shape the Hub accepts.
pub fn validate_repo_id(repo_id: &str) -> Result<String, HubloadError> {
    let trimmed = repo_id.trim();
    let mut parts = trimmed.split('/');
    let namespace = parts.next().unwrap_or_default();
    let dataset = parts.next().unwrap_or_default();
    let extra = parts.next();

    if namespace.is_empty() || dataset.is_empty() || extra.is_some() {
        return Err(HubloadError::InvalidIdentifier {
            input: repo_id.to_string(),
            message: "expected repo id in '<namespace>/<dataset>' form".to_string(),
        });
    }

    for segment in [namespace, dataset] {
        if !segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(HubloadError::InvalidIdentifier {
                input: repo_id.to_string(),
                message: format!(
                    "segment '{}' may only contain alphanumerics, '.', '_' and '-'",
                    segment
                ),
            });
        }
        if segment.starts_with(['.', '-']) || segment.ends_with(['.', '-']) {
            return Err(HubloadError::InvalidIdentifier {
                input: repo_id.to_string(),
                message: format!("segment '{}' may not start or end with '.' or '-'", segment),
            });
        }
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_repo_id_input() {
        let parsed = parse_repo_input("org/dataset", Some("dev")).expect("parse");
        assert_eq!(parsed.repo_id, "org/dataset");
        assert_eq!(parsed.branch.as_deref(), Some("dev"));
    }

    #[test]
    fn parse_dataset_url_input() {
        let parsed =
            parse_repo_input("https://huggingface.co/datasets/org/dataset", None).expect("parse");
        assert_eq!(parsed.repo_id, "org/dataset");
        assert_eq!(parsed.branch, None);
    }

    #[test]
    fn missing_separator_is_rejected() {
        let err = validate_repo_id("no-separator").expect_err("should fail");
        match err {
            HubloadError::InvalidIdentifier { message, .. } => {
                assert!(message.contains("<namespace>/<dataset>"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn extra_segment_is_rejected() {
        assert!(validate_repo_id("a/b/c").is_err());
    }

    #[test]
    fn empty_segments_are_rejected() {
        assert!(validate_repo_id("/dataset").is_err());
        assert!(validate_repo_id("org/").is_err());
        assert!(validate_repo_id("/").is_err());
    }

    #[test]
    fn bad_characters_are_rejected() {
        assert!(validate_repo_id("org/data set").is_err());
        assert!(validate_repo_id("org/data:set").is_err());
    }

    #[test]
    fn leading_and_trailing_punctuation_is_rejected() {
        assert!(validate_repo_id(".org/dataset").is_err());
        assert!(validate_repo_id("org/dataset-").is_err());
    }

    #[test]
    fn wrong_host_url_is_rejected() {
        let err = parse_repo_input("https://example.com/datasets/org/dataset", None)
            .expect_err("should fail");
        match err {
            HubloadError::InvalidIdentifier { message, .. } => {
                assert!(message.contains("huggingface.co"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
