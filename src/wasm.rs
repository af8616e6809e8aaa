use wasm_bindgen::prelude::*;

use crate::error::Error;
use crate::failure::ServerFailure;
use crate::failure::cause::OtherFailure;
use crate::failure::wrap::wrap_for_response;
use crate::status::{self, WireStatus, codec};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = JSON)]
    fn parse(s: &str) -> JsValue;
}

fn to_js(value: &serde_json::Value) -> JsValue {
    match serde_json::to_string(value) {
        Ok(json_str) => parse(&json_str),
        Err(_) => JsValue::NULL,
    }
}

fn status_to_js(status: &WireStatus) -> JsValue {
    match serde_json::to_value(status) {
        Ok(value) => to_js(&value),
        Err(e) => error_result(&Error::from(e).to_string()),
    }
}

fn failure_to_js(failure: &ServerFailure) -> JsValue {
    to_js(&serde_json::json!({
        "message": failure.message(),
        "sqlState": failure.sql_state(),
        "vendorCode": failure.vendor_code(),
    }))
}

/// The fixed info messages attached to every error status.
#[wasm_bindgen]
pub fn default_info() -> JsValue {
    to_js(&serde_json::json!(status::DEFAULT_INFO))
}

/// Decode a status JSON string into `{message, sqlState, vendorCode}`.
#[wasm_bindgen]
pub fn failure_from_status(json: &str) -> JsValue {
    match WireStatus::from_json(json) {
        Ok(status) => failure_to_js(&ServerFailure::from_status(&status)),
        Err(e) => error_result(&e.to_string()),
    }
}

/// Build the error status a server would send for the given fields.
#[wasm_bindgen]
pub fn status_from_failure(message: &str, sql_state: Option<String>, vendor_code: i32) -> JsValue {
    let failure = ServerFailure::from_parts(message.to_string(), sql_state, vendor_code, None);
    status_to_js(&failure.to_status())
}

/// Wrap a failure named `type_name` for `operation` and return its status.
#[wasm_bindgen]
pub fn wrap_for_response_status(
    operation: &str,
    type_name: &str,
    message: Option<String>,
) -> JsValue {
    let cause = match message {
        Some(message) => OtherFailure::new(type_name, message),
        None => OtherFailure::without_message(type_name),
    };
    status_to_js(&wrap_for_response(operation, cause).to_status())
}

/// Check a status object; `null` on success, otherwise the raised failure.
#[wasm_bindgen]
pub fn verify_status(value: JsValue, with_info: bool) -> JsValue {
    let status: WireStatus = match serde_wasm_bindgen::from_value(value) {
        Ok(s) => s,
        Err(e) => {
            let err = Error::Parse {
                reason: e.to_string(),
            };
            return error_result(&err.to_string());
        }
    };
    match codec::verify_success(&status, with_info) {
        Ok(()) => JsValue::NULL,
        Err(failure) => failure_to_js(&failure),
    }
}

fn error_result(msg: &str) -> JsValue {
    let obj = serde_json::json!({"error": msg});
    to_js(&obj)
}
