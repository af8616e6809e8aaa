use std::error::Error as StdError;

use crate::failure::ServerFailure;
use crate::failure::cause::Cause;
use crate::status::{StatusCode, WireStatus, default_info_messages};

impl ServerFailure {
    /// Flatten into an `ERROR_STATUS` envelope.
    ///
    /// Only message, SQL state and vendor code survive; info messages are
    /// always [`DEFAULT_INFO`](crate::status::DEFAULT_INFO).
    pub fn to_status(&self) -> WireStatus {
        tracing::trace!(
            sql_state = self.sql_state(),
            vendor_code = self.vendor_code(),
            "flattening server failure into status"
        );
        WireStatus {
            status_code: StatusCode::Error,
            sql_state: self.sql_state().map(str::to_string),
            error_code: self.vendor_code(),
            error_message: Some(self.message().to_string()),
            info_messages: default_info_messages(),
        }
    }
}

impl From<&ServerFailure> for WireStatus {
    fn from(failure: &ServerFailure) -> Self {
        failure.to_status()
    }
}

/// Status for any caught failure. Never fails.
pub fn status_for(cause: &Cause) -> WireStatus {
    match cause {
        Cause::Server(failure) => failure.to_status(),
        Cause::Other(other) => generic_status(other.message().map(str::to_string)),
    }
}

/// [`status_for`] over a plain error, keeping the fields of this crate's
/// own failure types.
pub fn status_for_error<E: StdError + 'static>(err: &E) -> WireStatus {
    match Cause::known(err) {
        Some(cause) => status_for(&cause),
        None => generic_status(Some(err.to_string())),
    }
}

fn generic_status(error_message: Option<String>) -> WireStatus {
    WireStatus {
        status_code: StatusCode::Error,
        sql_state: None,
        error_code: 0,
        error_message,
        info_messages: default_info_messages(),
    }
}

/// Client-side check of a received status.
///
/// `SUCCESS_STATUS` always passes, `SUCCESS_WITH_INFO_STATUS` only when
/// `with_info` is set. Anything else is raised as a [`ServerFailure`].
#[track_caller]
pub fn verify_success(status: &WireStatus, with_info: bool) -> Result<(), ServerFailure> {
    if status.status_code.is_success(with_info) {
        return Ok(());
    }
    tracing::trace!(
        status_code = status.status_code.as_ref(),
        error_code = status.error_code,
        "raising failure from status"
    );
    Err(ServerFailure::from_status(status))
}
