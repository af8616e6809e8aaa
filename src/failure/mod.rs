pub mod cause;
pub mod origin;
pub mod wrap;

use std::error::Error as StdError;
use std::fmt;

use crate::failure::cause::Cause;
use crate::failure::origin::{Origin, OriginFrame};
use crate::status::WireStatus;

/// A server-side failure as reported to remote callers.
///
/// Carries a message, an optional SQL-state style classification, a vendor
/// code that is always defined (0 when unset), and an optional cause chain.
/// Values are immutable once built; `origin` is diagnostic only.
#[derive(Debug, Clone)]
pub struct ServerFailure {
    message: String,
    sql_state: Option<String>,
    vendor_code: i32,
    cause: Option<Box<Cause>>,
    origin: Origin,
}

impl ServerFailure {
    #[track_caller]
    pub(crate) fn from_parts(
        message: String,
        sql_state: Option<String>,
        vendor_code: i32,
        cause: Option<Cause>,
    ) -> Self {
        Self {
            message,
            sql_state,
            vendor_code,
            cause: cause.map(Box::new),
            origin: Origin::here(),
        }
    }

    #[track_caller]
    pub fn empty() -> Self {
        Self::from_parts(String::new(), None, 0, None)
    }

    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_parts(message.into(), None, 0, None)
    }

    /// Message becomes the cause's descriptive form, `"<type>: <message>"`,
    /// or just `"<type>"` when the cause has no message.
    #[track_caller]
    pub fn from_cause(cause: impl Into<Cause>) -> Self {
        let cause = cause.into();
        Self::from_parts(cause.describe(), None, 0, Some(cause))
    }

    #[track_caller]
    pub fn with_state(message: impl Into<String>, sql_state: impl Into<String>) -> Self {
        Self::from_parts(message.into(), Some(sql_state.into()), 0, None)
    }

    #[track_caller]
    pub fn with_cause(message: impl Into<String>, cause: impl Into<Cause>) -> Self {
        Self::from_parts(message.into(), None, 0, Some(cause.into()))
    }

    #[track_caller]
    pub fn with_state_and_code(
        message: impl Into<String>,
        sql_state: impl Into<String>,
        vendor_code: i32,
    ) -> Self {
        Self::from_parts(message.into(), Some(sql_state.into()), vendor_code, None)
    }

    #[track_caller]
    pub fn with_state_and_cause(
        message: impl Into<String>,
        sql_state: impl Into<String>,
        cause: impl Into<Cause>,
    ) -> Self {
        Self::from_parts(message.into(), Some(sql_state.into()), 0, Some(cause.into()))
    }

    #[track_caller]
    pub fn with_all(
        message: impl Into<String>,
        sql_state: impl Into<String>,
        vendor_code: i32,
        cause: impl Into<Cause>,
    ) -> Self {
        Self::from_parts(
            message.into(),
            Some(sql_state.into()),
            vendor_code,
            Some(cause.into()),
        )
    }

    /// Rebuild a failure from a received status.
    ///
    /// Message, SQL state and error code are copied verbatim. The wire carries
    /// no cause chain, so none is reconstructed.
    #[track_caller]
    pub fn from_status(status: &WireStatus) -> Self {
        Self::from_parts(
            status.error_message.clone().unwrap_or_default(),
            status.sql_state.clone(),
            status.error_code,
            None,
        )
    }

    /// Append caller-supplied outer frames to the origin metadata.
    pub fn with_origin_frames(mut self, frames: impl IntoIterator<Item = OriginFrame>) -> Self {
        self.origin.extend(frames);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn sql_state(&self) -> Option<&str> {
        self.sql_state.as_deref()
    }

    pub fn vendor_code(&self) -> i32 {
        self.vendor_code
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_deref()
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn root_cause(&self) -> Option<&Cause> {
        self.cause().map(Cause::root)
    }
}

impl Default for ServerFailure {
    #[track_caller]
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for ServerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for ServerFailure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_deref().map(|c| c as &(dyn StdError + 'static))
    }
}

impl From<&WireStatus> for ServerFailure {
    #[track_caller]
    fn from(status: &WireStatus) -> Self {
        Self::from_status(status)
    }
}

impl From<WireStatus> for ServerFailure {
    #[track_caller]
    fn from(status: WireStatus) -> Self {
        Self::from_status(&status)
    }
}
