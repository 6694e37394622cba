//! Errors raised while reading a single content file

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn one content file into a post record
#[derive(Debug, Error)]
pub enum ContentError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The front-matter block is not valid YAML for a post
    #[error("invalid front-matter in {path}: {message}")]
    FrontMatter { path: PathBuf, message: String },
}

impl ContentError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn front_matter(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::FrontMatter {
            path: path.into(),
            message: message.into(),
        }
    }

    /// True when the underlying cause is a missing file
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_message() {
        let err = ContentError::io(
            "content/blog/a.mdx",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("content/blog/a.mdx"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_front_matter_error_message() {
        let err = ContentError::front_matter("a.mdx", "bad yaml");
        assert!(err.to_string().contains("invalid front-matter"));
        assert!(err.to_string().contains("bad yaml"));
        assert!(!err.is_not_found());
    }
}
