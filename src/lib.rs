#![doc(html_logo_url = "https://raw.githubusercontent.com/georust/meta/master/logo/logo.png")]
//! `proj-ctx` provides thread-safe bindings to the [PROJ](https://proj.org) v9 API
//!
//! PROJ keeps all of its mutable state (error number, logging, database handles,
//! search paths) in a *context*, and a context must never be used from two threads at
//! once. This crate models that directly:
//!
//! - A [`Context`] owns one native context behind a mutex. It is the only way to create
//!   [`Pj`] objects (CRS definitions, conversions and transformations).
//! - Every call on a [`Pj`] locks the context that created it, resets the native error
//!   number, makes the call, reads the error number back and restores the previous one.
//! - Calls that combine objects from different contexts (e.g.
//!   [`Context::new_crs_to_crs_from_pj`]) lock every context involved in a fixed order,
//!   so opposite compositions on two threads cannot deadlock.
//! - Contexts and objects can be destroyed explicitly with `destroy()`; any later use
//!   fails with [`ProjError::ContextDestroyed`] or [`ProjError::PjDestroyed`] instead of
//!   touching freed memory. Dropping the last reference releases them as well.
//!
//! The functions at the crate root ([`new`], [`new_crs_to_crs`], ...) use a lazily
//! created process-wide [`default_context`].
//!
//! # Example
//!
//! ```
//! use approx::assert_relative_eq;
//! use proj_ctx::{Context, Coord};
//!
//! let ctx = Context::new();
//! let pj = ctx.new_crs_to_crs("EPSG:4326", "EPSG:3857", None).unwrap();
//! let new_york = pj.forward(Coord::new(40.712778, -74.006111, 10.0, 0.0)).unwrap();
//! assert_relative_eq!(new_york.x(), -8238322.59, epsilon = 1e1);
//! assert_relative_eq!(new_york.y(), 4970068.35, epsilon = 1e1);
//! ```
//!
//! # Logging
//!
//! PROJ's own diagnostics are forwarded to the [`log`](https://docs.rs/log) facade under
//! the `proj` target. They are silenced until [`Context::set_log_level`] raises the
//! native verbosity.
//!
//! # Requirements
//!
//! `libproj` 9.4 or later must be installed and discoverable with `pkg-config`, or its
//! library directory named in the `PROJ_LIB_DIR` environment variable at build time.

mod area;
mod context;
mod coord;
mod cstring_array;
mod errno;
#[cfg(feature = "geo-types")]
mod geo_types;
mod identify;
mod info;
mod pj;
mod transform;

pub use crate::area::{Area, AreaOfUse};
pub use crate::context::{Context, ContextBuilder, LogLevel, default_context};
pub use crate::coord::{Bounds, Coord};
pub use crate::errno::ProjError;
pub use crate::identify::MAX_SUB_CRS;
pub use crate::info::{
    FullPjInfo, IdentifyMatch, IdentifyMatchInfo, PjInfo, PjType, Srid, Version, WktType,
};
pub use crate::pj::Pj;
pub use crate::transform::Direction;

use libc::c_char;
use std::ffi::CStr;

/// Copy a C string owned by PROJ into an owned `String`.
///
/// # Safety
///
/// `raw_ptr` must be null or point to a nul-terminated string that stays valid for the
/// duration of the call.
pub(crate) unsafe fn _string(raw_ptr: *const c_char) -> Result<String, std::str::Utf8Error> {
    if raw_ptr.is_null() {
        return Ok(String::new());
    }
    let c_str = unsafe { CStr::from_ptr(raw_ptr) };
    Ok(c_str.to_str()?.to_string())
}

/// Like [`_string`], but replaces invalid UTF-8 instead of failing. Used for
/// diagnostic text, which PROJ may produce in the platform's locale encoding.
///
/// # Safety
///
/// Same contract as [`_string`].
pub(crate) unsafe fn _string_lossy(raw_ptr: *const c_char) -> String {
    if raw_ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(raw_ptr) }
        .to_string_lossy()
        .into_owned()
}

/// Version of the linked `libproj`.
pub fn version() -> Version {
    // Safety: `proj_info` only reads static build information.
    let info = unsafe { proj_sys::proj_info() };
    Version {
        major: info.major,
        minor: info.minor,
        patch: info.patch,
        release: unsafe { _string_lossy(info.release) },
    }
}

/// Set the native log level of the [`default_context`].
pub fn set_log_level(level: LogLevel) -> Result<(), ProjError> {
    default_context().set_log_level(level)
}

/// Set the resource search paths of the [`default_context`].
pub fn set_search_paths<I, S>(paths: I) -> Result<(), ProjError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    default_context().set_search_paths(paths)
}

/// Create an object in the [`default_context`]. See [`Context::new_pj`].
pub fn new(definition: &str) -> Result<Pj, ProjError> {
    default_context().new_pj(definition)
}

/// Create an object from proj-string tokens in the [`default_context`].
/// See [`Context::new_pj_from_args`].
pub fn new_from_args<I, S>(args: I) -> Result<Pj, ProjError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    default_context().new_pj_from_args(args)
}

/// Create a transformation between two CRS in the [`default_context`].
/// See [`Context::new_crs_to_crs`].
pub fn new_crs_to_crs(
    source_crs: &str,
    target_crs: &str,
    area: Option<&Area>,
) -> Result<Pj, ProjError> {
    default_context().new_crs_to_crs(source_crs, target_crs, area)
}

/// Create a transformation between two CRS objects in the [`default_context`].
/// See [`Context::new_crs_to_crs_from_pj`].
pub fn new_crs_to_crs_from_pj(
    source: &Pj,
    target: &Pj,
    area: Option<&Area>,
    options: &[&str],
) -> Result<Pj, ProjError> {
    default_context().new_crs_to_crs_from_pj(source, target, area, options)
}

/// Combine a horizontal and a vertical CRS in the [`default_context`].
/// See [`Context::create_compound_crs`].
pub fn create_compound_crs(name: &str, horizontal: &Pj, vertical: &Pj) -> Result<Pj, ProjError> {
    default_context().create_compound_crs(name, horizontal, vertical)
}

/// Authorities known to the database of the [`default_context`].
pub fn authorities_from_database() -> Result<Vec<String>, ProjError> {
    default_context().authorities_from_database()
}

/// Every CRS code of every authority, as `AUTH:CODE`, from the [`default_context`].
pub fn all_crs_codes() -> Result<Vec<String>, ProjError> {
    default_context().all_crs_codes()
}
