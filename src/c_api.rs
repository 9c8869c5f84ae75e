// C ABI for hosts (desktop UI, OCR/speech front-ends) that hand the engine
// plain strings. Every call catches panics and answers with JSON; this relies
// on the release profile keeping the unwind panic strategy.
use crate::core::detector;
use crate::core::engine::TransliterationEngine;
use serde::Serialize;
use std::ffi::{c_char, CStr, CString};
use std::panic::catch_unwind;
use std::ptr;
use std::sync::OnceLock;
use tracing::error;

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum Reply {
    Output(String),
    Error(String),
}

fn engine() -> &'static TransliterationEngine {
    static ENGINE: OnceLock<TransliterationEngine> = OnceLock::new();
    ENGINE.get_or_init(TransliterationEngine::new)
}

/// Borrows a C string; null means "absent".
unsafe fn optional_str<'a>(ptr: *const c_char) -> Result<Option<&'a str>, String> {
    if ptr.is_null() {
        return Ok(None);
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(Some)
        .map_err(|e| format!("input is not UTF-8: {}", e))
}

fn into_c_string(reply: &Reply) -> *mut c_char {
    let json = serde_json::to_string(reply)
        .unwrap_or_else(|_| r#"{"error":"unserializable reply"}"#.to_string());
    CString::new(json).map_or(ptr::null_mut(), CString::into_raw)
}

/// Transliterates `text`. `direction` may be null for auto-detection.
/// Returns `{"output": ...}` or `{"error": ...}`; free with `lipi_free_string`.
///
/// # Safety
/// `text` and `direction` must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn lipi_transliterate(text: *const c_char, direction: *const c_char) -> *mut c_char {
    let result = catch_unwind(|| {
        let text = match optional_str(text) {
            Ok(Some(text)) => text,
            Ok(None) => return Reply::Error("text is null".to_string()),
            Err(e) => return Reply::Error(e),
        };
        let direction = match optional_str(direction) {
            Ok(direction) => direction,
            Err(e) => return Reply::Error(e),
        };
        match engine().transliterate(text, direction) {
            Ok(output) => Reply::Output(output),
            Err(e) => Reply::Error(e.to_string()),
        }
    });
    let reply = result.unwrap_or_else(|_| {
        error!("panic in lipi_transliterate");
        Reply::Error("internal error".to_string())
    });
    into_c_string(&reply)
}

/// Returns `{"output": "devanagari"}` or `{"output": "latin"}`.
///
/// # Safety
/// `text` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn lipi_detect_script(text: *const c_char) -> *mut c_char {
    let result = catch_unwind(|| match optional_str(text) {
        Ok(Some(text)) => Reply::Output(detector::detect(text).to_string()),
        Ok(None) => Reply::Error("text is null".to_string()),
        Err(e) => Reply::Error(e),
    });
    let reply = result.unwrap_or_else(|_| {
        error!("panic in lipi_detect_script");
        Reply::Error("internal error".to_string())
    });
    into_c_string(&reply)
}

/// # Safety
/// `s` must come from this library and not have been freed yet.
#[no_mangle]
pub unsafe extern "C" fn lipi_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
