mod file;
mod nvme;

pub use file::DumpFileSource;
pub use nvme::{NvmeCliSource, NvmeConfig};

use thiserror::Error;

/// Page request sent to a log source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogPageRequest {
    /// Requested page length in bytes.
    pub length: usize,
}

/// Produces hex dump text for a requested page length.
pub trait LogSource {
    fn fetch(&mut self, request: &LogPageRequest) -> Result<String, SourceError>;

    /// Short description used in reports and logs.
    fn describe(&self) -> String;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("log source command failed ({status}): {stderr}")]
    CommandFailed { status: String, stderr: String },
    #[error("log source returned no output")]
    EmptyOutput,
    #[error("log source output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Log source backed by a closure.
///
/// # Examples
/// ```
/// use logpage_core::{FnSource, LogPageRequest, LogSource};
///
/// let mut source = FnSource::new(|request: &LogPageRequest| Ok(format!("len {}", request.length)));
/// assert_eq!(source.fetch(&LogPageRequest { length: 8 })?, "len 8");
/// # Ok::<(), logpage_core::SourceError>(())
/// ```
pub struct FnSource<F> {
    fetch: F,
}

impl<F> FnSource<F>
where
    F: FnMut(&LogPageRequest) -> Result<String, SourceError>,
{
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

impl<F> LogSource for FnSource<F>
where
    F: FnMut(&LogPageRequest) -> Result<String, SourceError>,
{
    fn fetch(&mut self, request: &LogPageRequest) -> Result<String, SourceError> {
        (self.fetch)(request)
    }

    fn describe(&self) -> String {
        "injected".to_string()
    }
}
