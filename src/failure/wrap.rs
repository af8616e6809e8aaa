use std::error::Error as StdError;

use crate::failure::ServerFailure;
use crate::failure::cause::Cause;
use crate::failure::origin::OriginFrame;

/// Wrap a failure caught by an operation handler (e.g. `GetTables`) before
/// it is flattened into a response status.
///
/// The message names the operation plus the type and message of the
/// deepest cause. The original top-level cause is kept as the new
/// failure's cause. The origin points at the caller, not at this function,
/// so diagnostics show where the failure was caught. Wrapping an existing
/// [`ServerFailure`] is fine and records that catch site too.
#[track_caller]
pub fn wrap_for_response(operation_name: &str, cause: impl Into<Cause>) -> ServerFailure {
    let cause = cause.into();
    let message = response_message(operation_name, &cause);

    let mut failure = build_wrapped(message, cause);
    failure.origin.push(OriginFrame::caller());
    // Get rid of the frame for the wrapping call itself.
    failure.origin.drop_first();
    failure
}

// Not `#[track_caller]`: the origin's first frame is recorded inside this module.
fn build_wrapped(message: String, cause: Cause) -> ServerFailure {
    ServerFailure::from_parts(message, None, 0, Some(cause))
}

/// [`wrap_for_response`] for any error type.
#[track_caller]
pub fn wrap_error_for_response<E: StdError + 'static>(
    operation_name: &str,
    err: &E,
) -> ServerFailure {
    wrap_for_response(operation_name, Cause::from_error(err))
}

fn response_message(operation_name: &str, cause: &Cause) -> String {
    let root = cause.root();
    let root_type = root.type_name();
    tracing::debug!(
        operation = operation_name,
        root_type,
        depth = cause.chain().count(),
        "wrapping failure for response"
    );

    // An absent root message reads the same as an empty one.
    match root.message() {
        Some(root_message) if !root_message.is_empty() => {
            format!("{operation_name} error: {root_type} {root_message}")
        }
        _ => format!("{operation_name} error: {root_type}"),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::{build_wrapped, wrap_error_for_response, wrap_for_response};
    use crate::failure::ServerFailure;
    use crate::failure::cause::OtherFailure;

    fn lcg_next(state: &mut u64) -> u64 {
        *state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1);
        *state
    }

    #[test]
    fn empty_root_message_leaves_no_trailing_fragment() {
        let b = OtherFailure::new("B", "");
        let a = OtherFailure::new("A", "disk full").caused_by(b);
        let wrapped = wrap_for_response("GetTables", a);
        assert_eq!(wrapped.message(), "GetTables error: B");
    }

    #[test]
    fn absent_root_message_reads_as_empty() {
        let a = OtherFailure::new("A", "outer").caused_by(OtherFailure::without_message("Npe"));
        let wrapped = wrap_for_response("GetInfo", a);
        assert_eq!(wrapped.message(), "GetInfo error: Npe");
    }

    #[test]
    fn root_message_is_appended_after_type() {
        let wrapped = wrap_for_response(
            "ExecuteStatement",
            OtherFailure::new("Outer", "x").caused_by(OtherFailure::new("Io", "disk full")),
        );
        assert_eq!(wrapped.message(), "ExecuteStatement error: Io disk full");
    }

    #[test]
    fn original_top_level_cause_is_kept() {
        let a = OtherFailure::new("A", "top").caused_by(OtherFailure::new("B", "bottom"));
        let wrapped = wrap_for_response("GetTables", a);
        let cause = wrapped.cause().unwrap();
        assert_eq!(cause.type_name(), "A");
        assert_eq!(wrapped.root_cause().unwrap().type_name(), "B");
        assert_eq!(wrapped.sql_state(), None);
        assert_eq!(wrapped.vendor_code(), 0);
    }

    #[test]
    fn wrapping_a_server_failure_names_it() {
        let inner = ServerFailure::with_state_and_code("Table not found", "42S02", 10001);
        let wrapped = wrap_for_response("GetColumns", inner);
        assert_eq!(
            wrapped.message(),
            format!(
                "GetColumns error: {} Table not found",
                std::any::type_name::<ServerFailure>()
            )
        );
    }

    #[test]
    fn origin_points_at_the_caller() {
        let wrapped = wrap_for_response("GetSchemas", OtherFailure::new("Io", "eof"));
        let line = line!() - 1;
        assert_eq!(wrapped.origin().len(), 1);
        let frame = wrapped.origin().first().unwrap();
        assert_eq!(frame.file, file!());
        assert_eq!(frame.line, line);
    }

    #[test]
    fn wrapping_call_frame_is_recorded_then_trimmed() {
        let raw = build_wrapped("m".to_string(), OtherFailure::new("Io", "eof").into());
        let test_line = line!() - 1;
        let wrapper_frame = *raw.origin().first().unwrap();
        assert_eq!(raw.origin().len(), 1);
        assert_ne!(wrapper_frame.line, test_line);

        let wrapped = wrap_for_response("GetSchemas", OtherFailure::new("Io", "eof"));
        let line = line!() - 1;
        assert!(wrapped.origin().frames().iter().all(|f| *f != wrapper_frame));
        assert_eq!(wrapped.origin().first().unwrap().line, line);
    }

    #[test]
    fn own_failure_types_keep_their_names_when_passed_as_errors() {
        let err = OtherFailure::new("A", "disk full").caused_by(OtherFailure::new("B", ""));
        let wrapped = wrap_error_for_response("GetTables", &err);
        assert_eq!(wrapped.message(), "GetTables error: B");
    }

    #[test]
    fn std_errors_are_captured_with_their_type() {
        let err = std::io::Error::other("broken pipe");
        let wrapped = wrap_error_for_response("FetchResults", &err);
        assert_eq!(
            wrapped.message(),
            format!(
                "FetchResults error: {} broken pipe",
                std::any::type_name::<std::io::Error>()
            )
        );
    }

    #[test]
    fn message_prefix_and_root_type_hold_for_random_chains() {
        let mut seed = 0x5EED_u64;
        for _ in 0..2_000 {
            let depth = lcg_next(&mut seed) % 6;
            let root_name = format!("Root{}", lcg_next(&mut seed) % 1_000);
            let root_message = if lcg_next(&mut seed) % 2 == 0 {
                String::new()
            } else {
                format!("m{}", lcg_next(&mut seed) % 100)
            };

            let mut chain = OtherFailure::new(root_name.clone(), root_message.clone());
            for level in 0..depth {
                chain = OtherFailure::new(format!("Level{level}"), "wrapper").caused_by(chain);
            }

            let op = format!("Op{}", lcg_next(&mut seed) % 10);
            let wrapped = wrap_for_response(&op, chain);
            let prefix = format!("{op} error: ");
            assert!(wrapped.message().starts_with(&prefix));
            assert!(wrapped.message().contains(&root_name));
            if root_message.is_empty() {
                assert_eq!(wrapped.message(), format!("{prefix}{root_name}"));
            } else {
                assert_eq!(
                    wrapped.message(),
                    format!("{prefix}{root_name} {root_message}")
                );
            }
        }
    }
}
