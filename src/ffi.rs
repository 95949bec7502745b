//! C-ABI FFI bindings for cross-language integration.
//!
//! This module provides a C-compatible API for using unhwp from other languages
//! such as C#, Python, and Node.js.

use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::ptr;
use std::slice;

use crate::render::{self, JsonFormat};

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct UnhwpResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The result data (null if failed). Must be freed with `unhwp_free_result`.
    pub data: *mut c_char,
    /// Error message (null if succeeded). Must be freed with `unhwp_free_result`.
    pub error: *mut c_char,
}

impl UnhwpResult {
    fn success(data: String) -> Self {
        Self {
            success: true,
            data: CString::new(data).unwrap_or_default().into_raw(),
            error: ptr::null_mut(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error: CString::new(message).unwrap_or_default().into_raw(),
        }
    }

    fn from_text(text: Option<String>) -> Self {
        match text {
            Some(text) => Self::success(text),
            None => Self::error("No text found".to_string()),
        }
    }
}

unsafe fn path_arg<'a>(path: *const c_char) -> Result<&'a str, UnhwpResult> {
    if path.is_null() {
        return Err(UnhwpResult::error("Path cannot be null".to_string()));
    }
    CStr::from_ptr(path)
        .to_str()
        .map_err(|_| UnhwpResult::error("Invalid UTF-8 path".to_string()))
}

unsafe fn bytes_arg<'a>(data: *const u8, len: usize) -> Result<&'a [u8], UnhwpResult> {
    if data.is_null() {
        if len == 0 {
            return Ok(&[]);
        }
        return Err(UnhwpResult::error("Data cannot be null".to_string()));
    }
    Ok(slice::from_raw_parts(data, len))
}

/// Extract plain text from an HWP file.
///
/// # Safety
///
/// The `path` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `unhwp_free_result`.
#[no_mangle]
pub unsafe extern "C" fn unhwp_extract_text(path: *const c_char) -> UnhwpResult {
    match path_arg(path) {
        Ok(path) => UnhwpResult::from_text(crate::extract_file(Path::new(path))),
        Err(result) => result,
    }
}

/// Extract plain text from an in-memory HWP document.
///
/// # Safety
///
/// `data` must point to `len` readable bytes (it may be null when `len` is 0).
/// The returned result must be freed with `unhwp_free_result`.
#[no_mangle]
pub unsafe extern "C" fn unhwp_extract_bytes(data: *const u8, len: usize) -> UnhwpResult {
    match bytes_arg(data, len) {
        Ok(bytes) => UnhwpResult::from_text(crate::extract_text(bytes)),
        Err(result) => result,
    }
}

/// Run only the heuristic Korean line scan over raw bytes.
///
/// # Safety
///
/// `data` must point to `len` readable bytes (it may be null when `len` is 0).
/// The returned result must be freed with `unhwp_free_result`.
#[no_mangle]
pub unsafe extern "C" fn unhwp_extract_fallback(data: *const u8, len: usize) -> UnhwpResult {
    match bytes_arg(data, len) {
        Ok(bytes) => UnhwpResult::from_text(crate::extract_fallback(bytes)),
        Err(result) => result,
    }
}

/// Parse an HWP file and return the document as JSON.
///
/// # Safety
///
/// The `path` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `unhwp_free_result`.
#[no_mangle]
pub unsafe extern "C" fn unhwp_to_json(path: *const c_char, pretty: bool) -> UnhwpResult {
    let path = match path_arg(path) {
        Ok(path) => path,
        Err(result) => return result,
    };

    let format = if pretty {
        JsonFormat::Pretty
    } else {
        JsonFormat::Compact
    };

    match crate::parse_file(path).and_then(|doc| render::to_json(&doc, format)) {
        Ok(json) => UnhwpResult::success(json),
        Err(e) => UnhwpResult::error(e.to_string()),
    }
}

/// Get document metadata and statistics as JSON.
///
/// # Safety
///
/// The `path` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `unhwp_free_result`.
#[no_mangle]
pub unsafe extern "C" fn unhwp_get_info(path: *const c_char) -> UnhwpResult {
    let path = match path_arg(path) {
        Ok(path) => path,
        Err(result) => return result,
    };

    match get_info_internal(Path::new(path)) {
        Ok(info) => UnhwpResult::success(info),
        Err(e) => UnhwpResult::error(e.to_string()),
    }
}

fn get_info_internal(path: &Path) -> crate::Result<String> {
    let doc = crate::parse_file(path)?;
    let info = serde_json::json!({
        "version": doc.metadata.version,
        "compressed": doc.metadata.compressed,
        "password_protected": doc.metadata.password_protected,
        "distribution": doc.metadata.distribution,
        "section_count": doc.metadata.section_count,
        "stats": doc.stats,
    });
    render::to_json_value(&info, JsonFormat::Pretty)
}

/// Check if a file looks like an HWP document.
///
/// # Safety
///
/// The `path` must be a valid null-terminated UTF-8 string.
#[no_mangle]
pub unsafe extern "C" fn unhwp_is_hwp(path: *const c_char) -> bool {
    match path_arg(path) {
        Ok(path) => crate::detect::is_hwp(Path::new(path)),
        Err(result) => {
            unhwp_free_result(result);
            false
        }
    }
}

/// Free a result returned by any unhwp function.
///
/// # Safety
///
/// The `result` must have been returned by an unhwp function.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn unhwp_free_result(result: UnhwpResult) {
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Get the version of the unhwp library.
///
/// # Safety
///
/// The returned string is statically allocated and should not be freed.
#[no_mangle]
pub extern "C" fn unhwp_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
