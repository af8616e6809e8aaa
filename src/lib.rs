#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod error;
pub mod failure;
pub mod status;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::Error;
pub use failure::ServerFailure;
pub use failure::cause::{Cause, Chain, OtherFailure, UNKNOWN_SOURCE_TYPE};
pub use failure::origin::{Origin, OriginFrame};
pub use failure::wrap::{wrap_error_for_response, wrap_for_response};
pub use status::codec::{status_for, status_for_error, verify_success};
pub use status::{DEFAULT_INFO, StatusCode, WireStatus, default_info_messages};
