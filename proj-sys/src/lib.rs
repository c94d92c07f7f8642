#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![doc(html_logo_url = "https://raw.githubusercontent.com/georust/meta/master/logo/logo.png")]
//! # Low-level bindings for PROJ v9.4.x and later
//!
//! **This is a
//! [`*-sys`](https://doc.rust-lang.org/cargo/reference/build-scripts.html#-sys-packages)
//! crate; you shouldn't use its API directly.** See the `proj-ctx` crate for general use.
//!
//! A guide to the functions can be found here:
//! <https://proj.org/development/reference/functions.html>.
//!
//! The crate links against an existing `libproj` found with
//! [pkg-config](https://www.freedesktop.org/wiki/Software/pkg-config/), or in the
//! directory named by the `PROJ_LIB_DIR` environment variable.
//!
//! ## Features
//!
//! `buildtime_bindgen` - regenerate the complete declarations from the installed
//! `proj.h` with bindgen instead of using the checked-in subset. The checked-in
//! subset uses bindgen's naming, so either choice exposes the same names.
//!
//! `nobuild` - skip probing for and linking `libproj` (used for docs.rs).
//!
//! `proj_9_6` - require `libproj` 9.6 or later and declare the functions it added
//! (`proj_area_set_name`).

#[cfg(feature = "buildtime_bindgen")]
include!(concat!(env!("OUT_DIR"), "/bindings.rs"));

#[cfg(not(feature = "buildtime_bindgen"))]
include!("bundled_bindings.rs");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_is_four_doubles() {
        assert_eq!(std::mem::size_of::<PJ_COORD>(), 4 * std::mem::size_of::<f64>());
        assert_eq!(std::mem::align_of::<PJ_COORD>(), std::mem::align_of::<f64>());
    }

    #[cfg(not(feature = "nobuild"))]
    #[test]
    fn links_against_libproj() {
        let info = unsafe { proj_info() };
        assert!(info.major >= 9);
    }
}
