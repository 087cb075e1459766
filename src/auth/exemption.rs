//! Path exemption matching.
//!
//! Paths are compared slash-tolerantly: every trailing `/` is stripped and
//! exactly one is appended, so `/api/v1/status` and `/api/v1/status/` match.
//! There is no prefix or wildcard matching; every exempt path must be listed.

/// Normalize a path so it ends with exactly one `/`.
pub fn normalize_path(path: &str) -> String {
    let mut normalized = path.trim_end_matches('/').to_string();
    normalized.push('/');
    normalized
}

/// Decide whether `path` needs authentication given a list of exempt paths.
///
/// Returns `true` when the path is missing, the list is missing or empty,
/// or the normalized path matches no normalized entry.
pub fn requires_auth(path: Option<&str>, exemptions: Option<&[String]>) -> bool {
    let (Some(path), Some(exemptions)) = (path, exemptions) else {
        return true;
    };
    if exemptions.is_empty() {
        return true;
    }

    let path = normalize_path(path);
    !exemptions.iter().any(|entry| normalize_path(entry) == path)
}

/// Pre-normalized exemption list, built once from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExemptionList {
    paths: Vec<String>,
}

impl ExemptionList {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            paths: paths
                .into_iter()
                .map(|p| normalize_path(p.as_ref()))
                .collect(),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.paths
    }
}
