#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("parse error: {reason}")]
    Parse { reason: String },

    #[error("unknown status code: {0}")]
    UnknownStatusCode(i32),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
