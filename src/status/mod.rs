pub mod codec;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Info messages attached to every error status. Detailed diagnostics stay
/// in the server logs.
pub const DEFAULT_INFO: &[&str] = &["Server-side error; please check server logs."];

pub fn default_info_messages() -> Vec<String> {
    DEFAULT_INFO.iter().map(|s| (*s).to_string()).collect()
}

/// Outcome of a remote operation. Wire values are stable `i32`s.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
    strum_macros::EnumIter,
)]
#[serde(into = "i32", try_from = "i32")]
pub enum StatusCode {
    #[strum(serialize = "SUCCESS_STATUS")]
    Success,
    #[strum(serialize = "SUCCESS_WITH_INFO_STATUS")]
    SuccessWithInfo,
    #[strum(serialize = "STILL_EXECUTING_STATUS")]
    StillExecuting,
    #[strum(serialize = "ERROR_STATUS")]
    Error,
    #[strum(serialize = "INVALID_HANDLE_STATUS")]
    InvalidHandle,
}

impl StatusCode {
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::SuccessWithInfo => 1,
            Self::StillExecuting => 2,
            Self::Error => 3,
            Self::InvalidHandle => 4,
        }
    }

    /// `SuccessWithInfo` only counts as success when the caller accepts info.
    pub fn is_success(self, with_info: bool) -> bool {
        match self {
            Self::Success => true,
            Self::SuccessWithInfo => with_info,
            Self::StillExecuting | Self::Error | Self::InvalidHandle => false,
        }
    }
}

impl From<StatusCode> for i32 {
    fn from(code: StatusCode) -> Self {
        code.as_i32()
    }
}

impl TryFrom<i32> for StatusCode {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Error> {
        match value {
            0 => Ok(StatusCode::Success),
            1 => Ok(StatusCode::SuccessWithInfo),
            2 => Ok(StatusCode::StillExecuting),
            3 => Ok(StatusCode::Error),
            4 => Ok(StatusCode::InvalidHandle),
            other => Err(Error::UnknownStatusCode(other)),
        }
    }
}

/// The fixed-schema status envelope exchanged with remote clients.
///
/// Field names and the integer status code match the protocol's wire
/// schema. `errorCode` and `infoMessages` default when missing on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireStatus {
    pub status_code: StatusCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_state: Option<String>,
    #[serde(default)]
    pub error_code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub info_messages: Vec<String>,
}

impl WireStatus {
    /// A status with protocol defaults for everything but the code.
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            sql_state: None,
            error_code: 0,
            error_message: None,
            info_messages: Vec::new(),
        }
    }

    pub fn success() -> Self {
        Self::new(StatusCode::Success)
    }

    pub fn is_error(&self) -> bool {
        self.status_code == StatusCode::Error
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        if json.trim().is_empty() {
            return Err(Error::Parse {
                reason: "empty status payload".into(),
            });
        }
        Ok(serde_json::from_str(json)?)
    }
}
