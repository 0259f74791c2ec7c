use crate::controller::upstream::UpstreamError;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum CoreError {
    #[error("upstream error: {0}")]
    Upstream(#[from] UpstreamError),
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
