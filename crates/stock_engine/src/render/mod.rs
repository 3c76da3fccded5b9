//! Turning a product URL into final HTML.
use std::path::PathBuf;

mod decode;
mod http;
mod phantomjs;

pub use decode::{decode_page, DecodeError};
pub use http::{HttpRenderer, HttpSettings};
pub use phantomjs::{default_search_paths, PhantomJsRenderer};

/// Produces the HTML a browser would end up with for `url`.
///
/// Every failure is reported per call; a renderer never aborts the process.
#[async_trait::async_trait]
pub trait ContentRenderer: Send + Sync {
    async fn render(&self, url: &str) -> Result<String, RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("phantomjs binary not found (searched {searched:?})")]
    BinaryNotFound { searched: Vec<PathBuf> },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("renderer exited with {status}: {stderr}")]
    ExitStatus { status: String, stderr: String },
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("redirect limit exceeded")]
    RedirectLimitExceeded,
    #[error("response too large (max {max_bytes}, actual {actual:?})")]
    TooLarge { max_bytes: u64, actual: Option<u64> },
    #[error("unsupported content type {0}")]
    UnsupportedContentType(String),
    #[error("network error: {0}")]
    Network(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
