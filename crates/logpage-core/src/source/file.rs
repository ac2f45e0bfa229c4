use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{LogPageRequest, LogSource, SourceError};

/// Replays a hex dump previously saved from the log source.
pub struct DumpFileSource {
    path: PathBuf,
    text: String,
}

impl DumpFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let text = fs::read_to_string(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }
}

impl LogSource for DumpFileSource {
    fn fetch(&mut self, request: &LogPageRequest) -> Result<String, SourceError> {
        if self.text.trim().is_empty() {
            return Err(SourceError::EmptyOutput);
        }
        debug!(
            path = %self.path.display(),
            requested = request.length,
            "replaying saved dump"
        );
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::DumpFileSource;
    use crate::source::{LogPageRequest, LogSource, SourceError};

    #[test]
    fn replays_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "banner\nheader\n0000: 01\n").unwrap();

        let mut source = DumpFileSource::open(file.path()).unwrap();
        let text = source.fetch(&LogPageRequest { length: 4 }).unwrap();
        assert!(text.ends_with("0000: 01\n"));
        assert!(source.describe().starts_with("file:"));
    }

    #[test]
    fn empty_file_is_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut source = DumpFileSource::open(file.path()).unwrap();
        let err = source.fetch(&LogPageRequest { length: 4 }).unwrap_err();
        assert!(matches!(err, SourceError::EmptyOutput));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = match DumpFileSource::open(&dir.path().join("missing.txt")) {
            Ok(_) => panic!("expected missing file to be rejected"),
            Err(err) => err,
        };
        assert!(matches!(err, SourceError::Io(_)));
    }
}
