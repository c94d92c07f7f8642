use crate::context::ThreadContext;
use crate::info::WktType;
use libc::c_int;
use std::{ffi, str};
use thiserror::Error;

/// A native error number, as reported by `proj_errno` or `proj_context_errno`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Errno(pub c_int);

impl Errno {
    pub fn is_ok(self) -> bool {
        self.0 == 0
    }

    /// Render the message for this error number in the locale and version of `context`.
    pub fn message(&self, context: &ThreadContext) -> String {
        if self.0 == 0 {
            return "operation failed without a native error code".to_string();
        }
        let message = unsafe {
            crate::_string_lossy(proj_sys::proj_context_errno_string(
                context.as_ptr(),
                self.0,
            ))
        };
        if message.is_empty() {
            format!("unknown error (code {})", self.0)
        } else {
            message
        }
    }
}

/// Scoped reset of an object's error number.
///
/// Entering resets the native error number so the next read reflects only the call
/// made inside the scope; dropping puts the previous value back. Must only live while
/// the owning context's lock is held.
pub(crate) struct ErrnoScope {
    pj: *mut proj_sys::PJ,
    saved: c_int,
}

impl ErrnoScope {
    pub fn enter(pj: *mut proj_sys::PJ) -> Self {
        let saved = unsafe { proj_sys::proj_errno_reset(pj) };
        ErrnoScope { pj, saved }
    }

    pub fn errno(&self) -> Errno {
        Errno(unsafe { proj_sys::proj_errno(self.pj) })
    }

    /// Fail with `make` if the native error number is set.
    pub fn check(
        &self,
        context: &ThreadContext,
        make: fn(Errno, &ThreadContext) -> ProjError,
    ) -> Result<(), ProjError> {
        let errno = self.errno();
        if errno.is_ok() {
            Ok(())
        } else {
            Err(make(errno, context))
        }
    }
}

impl Drop for ErrnoScope {
    fn drop(&mut self) {
        // `proj_errno_restore` ignores a zero value.
        unsafe {
            if self.saved == 0 {
                proj_sys::proj_errno_reset(self.pj);
            } else {
                proj_sys::proj_errno_restore(self.pj, self.saved);
            }
        }
    }
}

/// Errors reported by this crate.
///
/// Messages of the native variants come from PROJ and depend on its version and
/// locale; match on the variant and [`ProjError::errno`] rather than on the text.
#[derive(Error, Debug)]
pub enum ProjError {
    /// PROJ could not build an object from the given definition or objects.
    #[error("{message}")]
    Creation { errno: i32, message: String },
    /// A coordinate transformation failed, e.g. for an out-of-domain input.
    /// The object stays usable.
    #[error("{message}")]
    Transform { errno: i32, message: String },
    /// Any other native call that reported an error number.
    #[error("{message}")]
    Native { errno: i32, message: String },
    /// The object has no representation in the requested WKT variant.
    #[error("projection not compatible with an export to {0}")]
    IncompatibleExport(WktType),
    #[error("unexpected PJ_TYPE: {0}")]
    UnexpectedType(u32),
    #[error("unexpected PJ_LOG_LEVEL: {0}")]
    UnexpectedLogLevel(u32),
    #[error("listing sub-CRS aborted after {0} components")]
    SubCrsLimit(usize),
    #[error("the PROJ context has been destroyed")]
    ContextDestroyed,
    #[error("the PROJ object has been destroyed")]
    PjDestroyed,
    #[error("invalid coordinate layout: {0}")]
    InvalidLayout(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("PROJ could not allocate a {0}")]
    Allocation(&'static str),
    #[error("A nul byte was found in a string passed to PROJ: {0}")]
    ArgumentNul(#[from] ffi::NulError),
    #[error("PROJ returned a string that is not valid UTF-8: {0}")]
    Utf8(#[from] str::Utf8Error),
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<ProjError>,
    },
}

impl ProjError {
    pub(crate) fn creation(errno: Errno, context: &ThreadContext) -> Self {
        ProjError::Creation {
            errno: errno.0,
            message: errno.message(context),
        }
    }

    pub(crate) fn transform(errno: Errno, context: &ThreadContext) -> Self {
        ProjError::Transform {
            errno: errno.0,
            message: errno.message(context),
        }
    }

    pub(crate) fn native(errno: Errno, context: &ThreadContext) -> Self {
        ProjError::Native {
            errno: errno.0,
            message: errno.message(context),
        }
    }

    /// Wrap `self` with a description of the step that failed.
    pub(crate) fn context(self, context: impl Into<String>) -> Self {
        ProjError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The native error number behind this error, looking through added context.
    pub fn errno(&self) -> Option<i32> {
        match self {
            ProjError::Creation { errno, .. }
            | ProjError::Transform { errno, .. }
            | ProjError::Native { errno, .. } => Some(*errno),
            ProjError::Context { source, .. } => source.errno(),
            _ => None,
        }
    }

    /// The innermost error, with any added context removed.
    pub fn root(&self) -> &ProjError {
        match self {
            ProjError::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Context;

    #[test]
    fn test_context_wrapping_keeps_errno() {
        let err = ProjError::Transform {
            errno: 2049,
            message: "Invalid coordinate".to_string(),
        }
        .context("slice 3");
        assert_eq!(err.errno(), Some(2049));
        assert_eq!(err.to_string(), "slice 3: Invalid coordinate");
        assert!(matches!(err.root(), ProjError::Transform { .. }));
    }

    #[test]
    fn test_errno_without_code() {
        assert_eq!(ProjError::PjDestroyed.errno(), None);
        assert_eq!(ProjError::SubCrsLimit(100).errno(), None);
    }

    #[test]
    fn test_zero_errno_message() {
        let ctx = Context::new();
        let message = ctx
            .with_native(|native| Ok(Errno(0).message(native)))
            .unwrap();
        assert!(!message.is_empty());
    }

    #[test]
    fn test_errno_scope_restores_previous_value() {
        let ctx = Context::new();
        let pj = ctx.new_crs_to_crs("EPSG:4326", "EPSG:3857", None).unwrap();
        pj.with_handle(|_, raw| {
            // An out-of-range latitude leaves a non-zero errno on the object.
            let invalid = crate::Coord::new(91.0, 0.0, 0.0, 0.0).to_pj();
            unsafe { proj_sys::proj_trans(raw, proj_sys::PJ_DIRECTION_PJ_FWD, invalid) };
            let before = Errno(unsafe { proj_sys::proj_errno(raw) });
            assert!(!before.is_ok());
            {
                let scope = ErrnoScope::enter(raw);
                assert!(scope.errno().is_ok());
            }
            assert_eq!(Errno(unsafe { proj_sys::proj_errno(raw) }), before);
            unsafe { proj_sys::proj_errno_reset(raw) };
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_failed_transform_does_not_leak_errno() {
        let pj = Context::new()
            .new_crs_to_crs("EPSG:4326", "EPSG:3857", None)
            .unwrap();
        assert!(pj.forward(crate::Coord::new(91.0, 0.0, 0.0, 0.0)).is_err());
        pj.with_handle(|_, raw| {
            assert!(Errno(unsafe { proj_sys::proj_errno(raw) }).is_ok());
            Ok(())
        })
        .unwrap();
    }
}
