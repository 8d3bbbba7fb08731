//! Document fetching relative to the site root

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::core::error::FetchError;

/// Loads raw document text by reference
pub trait Fetch {
    fn fetch(&self, reference: &str) -> Result<String, FetchError>;
}

/// Reads references as `/`-separated paths below a site root directory
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a reference onto the filesystem, refusing to leave the root
    pub fn resolve(&self, reference: &str) -> Result<PathBuf, FetchError> {
        let mut path = self.root.clone();
        let mut segments = 0;
        for segment in reference.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => return Err(FetchError::InvalidReference(reference.to_string())),
                _ if segment.contains(':') => {
                    return Err(FetchError::InvalidReference(reference.to_string()))
                }
                _ => {
                    path.push(segment);
                    segments += 1;
                }
            }
        }
        if segments == 0 {
            return Err(FetchError::InvalidReference(reference.to_string()));
        }
        Ok(path)
    }
}

impl Fetch for FsFetcher {
    fn fetch(&self, reference: &str) -> Result<String, FetchError> {
        let path = self.resolve(reference)?;
        tracing::debug!("Fetching {}", path.display());

        std::fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => FetchError::NotFound(reference.to_string()),
            _ => FetchError::Io {
                reference: reference.to_string(),
                source,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_relative_reference() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("sources/Классы")).unwrap();
        std::fs::write(dir.path().join("sources/Классы/Механик.md"), "# Механик").unwrap();

        let fetcher = FsFetcher::new(dir.path());
        assert_eq!(fetcher.fetch("sources/Классы/Механик.md").unwrap(), "# Механик");
        assert_eq!(fetcher.fetch("/sources/Классы/Механик.md").unwrap(), "# Механик");
    }

    #[test]
    fn test_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FsFetcher::new(dir.path());
        assert!(matches!(fetcher.fetch("nope.md"), Err(FetchError::NotFound(_))));
    }

    #[test]
    fn test_rejects_escaping_references() {
        let fetcher = FsFetcher::new("/srv/site");
        for bad in ["../etc/passwd", "sources/../../x.md", "", "/", "C:/x.md"] {
            assert!(
                matches!(fetcher.resolve(bad), Err(FetchError::InvalidReference(_))),
                "{bad} should be rejected"
            );
        }
    }
}
