//! FFI interface for C/C++ interop
//!
//! Exposes extraction and scraping as C-compatible functions.
//! Trees are passed back as JSON; strict-mode absence is the JSON `null`.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use crate::extractors::{extract_opengraph, ExtractOptions, MetaTree};
use crate::scrape::{scrape_blocking, ScrapeOptions};

/// Result struct returned to C++
/// Both pointers are owned by Rust and must be freed via og_free_result
#[repr(C)]
pub struct OgResultFFI {
    /// JSON-serialized tree or `null` (null-terminated)
    pub json_ptr: *mut c_char,
    /// Error message if the call failed (null-terminated), or null on success
    pub error_ptr: *mut c_char,
}

/// Extract the Open Graph tree from an HTML buffer.
///
/// # Arguments
/// * `html_ptr` - Pointer to HTML content (UTF-8, not necessarily null-terminated)
/// * `html_len` - Length of HTML content in bytes
/// * `strict` - Return `null` when the page declares no Open Graph namespace
///
/// # Safety
/// - `html_ptr` must point to valid memory of at least `html_len` bytes
/// - Caller must free the result via `og_free_result`
#[no_mangle]
pub unsafe extern "C" fn og_extract_ffi(
    html_ptr: *const c_char,
    html_len: usize,
    strict: bool,
) -> OgResultFFI {
    let html = match html_from_raw(html_ptr, html_len) {
        Ok(html) => html,
        Err(msg) => return make_error_result(msg),
    };

    let options = ExtractOptions::new().strict(strict);
    make_tree_result(extract_opengraph(html, &options).as_ref())
}

/// Fetch a URL (blocking) and extract its Open Graph tree.
///
/// # Safety
/// - `url` must be a valid null-terminated C string
/// - Caller must free the result via `og_free_result`
#[no_mangle]
pub unsafe extern "C" fn og_scrape_ffi(url: *const c_char, strict: bool) -> OgResultFFI {
    let url = if url.is_null() {
        return make_error_result("URL is null");
    } else {
        match CStr::from_ptr(url).to_str() {
            Ok(s) => s,
            Err(_) => return make_error_result("Invalid UTF-8 in URL"),
        }
    };

    match scrape_blocking(url, &ScrapeOptions::new().strict(strict)) {
        Ok(tree) => make_tree_result(tree.as_ref()),
        Err(e) => make_error_result(&e.to_string()),
    }
}

/// Free an OgResultFFI returned by og_extract_ffi or og_scrape_ffi
///
/// # Safety
/// - `result` must have been returned by this library
/// - Must only be called once per result
#[no_mangle]
pub unsafe extern "C" fn og_free_result(result: OgResultFFI) {
    if !result.json_ptr.is_null() {
        drop(CString::from_raw(result.json_ptr));
    }
    if !result.error_ptr.is_null() {
        drop(CString::from_raw(result.error_ptr));
    }
}

unsafe fn html_from_raw<'a>(
    html_ptr: *const c_char,
    html_len: usize,
) -> Result<&'a str, &'static str> {
    if html_ptr.is_null() || html_len == 0 {
        return Ok("");
    }
    let slice = std::slice::from_raw_parts(html_ptr as *const u8, html_len);
    std::str::from_utf8(slice).map_err(|_| "Invalid UTF-8 in HTML")
}

fn make_tree_result(tree: Option<&MetaTree>) -> OgResultFFI {
    match serde_json::to_string(&tree) {
        Ok(json) => match CString::new(json) {
            Ok(cstr) => OgResultFFI {
                json_ptr: cstr.into_raw(),
                error_ptr: ptr::null_mut(),
            },
            Err(_) => make_error_result("Result contains null bytes"),
        },
        Err(e) => make_error_result(&format!("Serialize error: {}", e)),
    }
}

// Helper to create error result
fn make_error_result(msg: &str) -> OgResultFFI {
    let error_cstr = CString::new(msg.replace('\0', " ")).unwrap_or_default();
    OgResultFFI {
        json_ptr: ptr::null_mut(),
        error_ptr: error_cstr.into_raw(),
    }
}
