//! Origin-labelled raw configuration text.

use std::path::{Path, PathBuf};

use super::ConfigError;

/// One layered configuration file: its origin path plus raw text, immutable
/// once read.
#[derive(Debug, Clone)]
pub struct Source {
    origin: PathBuf,
    text: String,
}

impl Source {
    /// Reads a source from disk.
    ///
    /// Returns `Ok(None)` if the file does not exist; callers degrade a
    /// missing source to an empty mapping plus a warning.
    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Some(Self {
                origin: path.to_path_buf(),
                text,
            })),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    pub fn origin(&self) -> &Path {
        &self.origin
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_existing_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "KEY=value").unwrap();

        let source = Source::read(file.path()).unwrap().unwrap();
        assert_eq!(source.origin(), file.path());
        assert_eq!(source.text(), "KEY=value\n");
    }

    #[test]
    fn test_read_missing_file_is_none() {
        let source = Source::read(Path::new("/nonexistent/path/.env")).unwrap();
        assert!(source.is_none());
    }
}
