use crate::area::{Area, native_area_ptr};
use crate::cstring_array::{CStringArray, NativeStringList};
use crate::errno::{Errno, ProjError};
use crate::info::PjType;
use crate::pj::Pj;
use libc::{c_char, c_int, c_void};
use log::{debug, error, trace, warn};
use std::ffi::CString;
use std::fmt;
use std::ptr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

/// PROJ thread context
pub(crate) struct ThreadContext(ptr::NonNull<proj_sys::PJ_CONTEXT>);

// Safety: a PROJ context may move between threads as long as it is used by one thread
// at a time, which the mutex in `ContextInner` guarantees.
unsafe impl Send for ThreadContext {}

impl ThreadContext {
    fn new() -> Self {
        let ctx_ptr = unsafe { proj_sys::proj_context_create() };
        let context = ptr::NonNull::new(ctx_ptr)
            .map(ThreadContext)
            .expect("proj_context_create returned null: out of memory");
        context.install_logger();
        context
    }

    /// A new native context with the same search paths, database and settings.
    fn try_clone(&self) -> Result<Self, ProjError> {
        let ctx_ptr = unsafe { proj_sys::proj_context_clone(self.as_ptr()) };
        let context = ptr::NonNull::new(ctx_ptr)
            .map(ThreadContext)
            .ok_or(ProjError::Allocation("PJ_CONTEXT"))?;
        context.install_logger();
        Ok(context)
    }

    pub fn as_ptr(&self) -> *mut proj_sys::PJ_CONTEXT {
        self.0.as_ptr()
    }

    /// Error number of the last failed call made directly on this context.
    pub fn errno(&self) -> Errno {
        Errno(unsafe { proj_sys::proj_context_errno(self.as_ptr()) })
    }

    fn install_logger(&self) {
        unsafe {
            proj_sys::proj_log_func(self.as_ptr(), ptr::null_mut(), Some(forward_native_log));
            proj_sys::proj_log_level(self.as_ptr(), proj_sys::PJ_LOG_LEVEL_PJ_LOG_NONE);
        }
    }
}

impl Drop for ThreadContext {
    fn drop(&mut self) {
        // Safety: The pointer is owned by this `ThreadContext` and released exactly once.
        unsafe { proj_sys::proj_context_destroy(self.0.as_ptr()) };
    }
}

/// Forwards PROJ's diagnostics to the `log` facade under the `proj` target.
unsafe extern "C" fn forward_native_log(_app_data: *mut c_void, level: c_int, message: *const c_char) {
    let message = unsafe { crate::_string_lossy(message) };
    let message = message.trim_end();
    match level as proj_sys::PJ_LOG_LEVEL {
        proj_sys::PJ_LOG_LEVEL_PJ_LOG_ERROR => error!(target: "proj", "{message}"),
        proj_sys::PJ_LOG_LEVEL_PJ_LOG_DEBUG => debug!(target: "proj", "{message}"),
        _ => trace!(target: "proj", "{message}"),
    }
}

/// Verbosity of PROJ's own diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    None,
    Error,
    Debug,
    Trace,
    /// Only used to query the current level; setting it leaves the level unchanged.
    Tell,
}

impl LogLevel {
    fn to_native(self) -> proj_sys::PJ_LOG_LEVEL {
        match self {
            LogLevel::None => proj_sys::PJ_LOG_LEVEL_PJ_LOG_NONE,
            LogLevel::Error => proj_sys::PJ_LOG_LEVEL_PJ_LOG_ERROR,
            LogLevel::Debug => proj_sys::PJ_LOG_LEVEL_PJ_LOG_DEBUG,
            LogLevel::Trace => proj_sys::PJ_LOG_LEVEL_PJ_LOG_TRACE,
            LogLevel::Tell => proj_sys::PJ_LOG_LEVEL_PJ_LOG_TELL,
        }
    }

    fn from_native(level: proj_sys::PJ_LOG_LEVEL) -> Result<Self, ProjError> {
        match level {
            proj_sys::PJ_LOG_LEVEL_PJ_LOG_NONE => Ok(LogLevel::None),
            proj_sys::PJ_LOG_LEVEL_PJ_LOG_ERROR => Ok(LogLevel::Error),
            proj_sys::PJ_LOG_LEVEL_PJ_LOG_DEBUG => Ok(LogLevel::Debug),
            proj_sys::PJ_LOG_LEVEL_PJ_LOG_TRACE => Ok(LogLevel::Trace),
            proj_sys::PJ_LOG_LEVEL_PJ_LOG_TELL => Ok(LogLevel::Tell),
            other => Err(ProjError::UnexpectedLogLevel(other as u32)),
        }
    }
}

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

static DEFAULT_CONTEXT: OnceLock<Context> = OnceLock::new();

pub(crate) type NativeGuard<'a> = MutexGuard<'a, Option<ThreadContext>>;

struct ContextInner {
    /// Process-unique, orders locks across contexts.
    id: u64,
    /// `None` once destroyed.
    native: Mutex<Option<ThreadContext>>,
}

/// A PROJ context: the owner of every [`Pj`] created from it.
///
/// Cloning is cheap and yields another handle to the same native context. All native
/// calls on the context, and on every object created from it, are serialized by one
/// mutex, so a `Context` and its objects can be shared freely between threads.
///
/// The native context is released by [`Context::destroy`] or when the last handle,
/// including the ones held by its objects, is dropped.
#[derive(Clone)]
pub struct Context(Arc<ContextInner>);

impl Context {
    /// Create a new native context with logging silenced.
    ///
    /// # Panics
    ///
    /// If PROJ cannot allocate a context.
    pub fn new() -> Self {
        Context::from_native(ThreadContext::new())
    }

    fn from_native(native: ThreadContext) -> Self {
        let id = NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed);
        debug!("created PROJ context {id}");
        Context(Arc::new(ContextInner {
            id,
            native: Mutex::new(Some(native)),
        }))
    }

    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    pub fn id(&self) -> u64 {
        self.0.id
    }

    /// Lock the native context. A panic while the lock was held leaves no native state
    /// half-updated, so poisoning is ignored.
    pub(crate) fn lock(&self) -> NativeGuard<'_> {
        self.0
            .native
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with the native context locked.
    ///
    /// `f` must not drop a [`Pj`] of this context: dropping one locks the context again.
    pub(crate) fn with_native<T>(
        &self,
        f: impl FnOnce(&ThreadContext) -> Result<T, ProjError>,
    ) -> Result<T, ProjError> {
        let guard = self.lock();
        let native = guard.as_ref().ok_or(ProjError::ContextDestroyed)?;
        f(native)
    }

    /// Release the native context now. Idempotent.
    ///
    /// Objects created from this context stay valid to drop or destroy, but every other
    /// call on them fails with [`ProjError::ContextDestroyed`]. The process-wide
    /// [`default_context`] is never released this way.
    pub fn destroy(&self) {
        if self.is_default() {
            warn!("ignoring request to destroy the default PROJ context");
            return;
        }
        let mut guard = self.lock();
        if let Some(native) = guard.take() {
            drop(native);
            debug!("destroyed PROJ context {}", self.id());
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.lock().is_none()
    }

    fn is_default(&self) -> bool {
        DEFAULT_CONTEXT
            .get()
            .is_some_and(|default| Arc::ptr_eq(&default.0, &self.0))
    }

    /// Create an independent context with the same configuration as this one.
    pub fn duplicate(&self) -> Result<Context, ProjError> {
        let native = self.with_native(|native| native.try_clone())?;
        Ok(Context::from_native(native))
    }

    /// Set the verbosity of PROJ's own diagnostics, see [`LogLevel`].
    pub fn set_log_level(&self, level: LogLevel) -> Result<(), ProjError> {
        self.with_native(|native| {
            unsafe { proj_sys::proj_log_level(native.as_ptr(), level.to_native()) };
            Ok(())
        })
    }

    pub fn log_level(&self) -> Result<LogLevel, ProjError> {
        self.with_native(|native| {
            let level = unsafe {
                proj_sys::proj_log_level(native.as_ptr(), proj_sys::PJ_LOG_LEVEL_PJ_LOG_TELL)
            };
            LogLevel::from_native(level)
        })
    }

    /// Replace the directories PROJ searches for resource files (`proj.db`, grids).
    /// An empty list restores PROJ's defaults.
    pub fn set_search_paths<I, S>(&self, paths: I) -> Result<(), ProjError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paths = CStringArray::try_from_iter(paths)?;
        let count = c_int::try_from(paths.len()).map_err(|_| {
            ProjError::InvalidArgument(format!("too many search paths: {}", paths.len()))
        })?;
        self.with_native(|native| {
            unsafe {
                proj_sys::proj_context_set_search_paths(native.as_ptr(), count, paths.as_ptr())
            };
            Ok(())
        })
    }

    /// Create an object from a proj-string, a WKT or PROJJSON text, or an `AUTH:CODE`
    /// identifier.
    pub fn new_pj(&self, definition: &str) -> Result<Pj, ProjError> {
        let definition = CString::new(definition)?;
        let raw = self.with_native(|native| {
            created(native, unsafe {
                proj_sys::proj_create(native.as_ptr(), definition.as_ptr())
            })
        })?;
        Ok(Pj::from_raw(self.clone(), raw))
    }

    /// Create an object from proj-string tokens without the leading `+`,
    /// e.g. `["proj=utm", "zone=32", "ellps=GRS80"]`.
    pub fn new_pj_from_args<I, S>(&self, args: I) -> Result<Pj, ProjError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = CStringArray::try_from_iter(args)?;
        let argc = c_int::try_from(args.len())
            .map_err(|_| ProjError::InvalidArgument(format!("too many arguments: {}", args.len())))?;
        let raw = self.with_native(|native| {
            created(native, unsafe {
                proj_sys::proj_create_argv(native.as_ptr(), argc, args.as_argv())
            })
        })?;
        Ok(Pj::from_raw(self.clone(), raw))
    }

    /// Create a transformation between two CRS given as definitions or identifiers.
    ///
    /// When several operations exist, `area` narrows the candidates to the ones valid
    /// in that region.
    pub fn new_crs_to_crs(
        &self,
        source_crs: &str,
        target_crs: &str,
        area: Option<&Area>,
    ) -> Result<Pj, ProjError> {
        let source_crs = CString::new(source_crs)?;
        let target_crs = CString::new(target_crs)?;
        let (_area, area_ptr) = native_area_ptr(area)?;
        let raw = self.with_native(|native| {
            created(native, unsafe {
                proj_sys::proj_create_crs_to_crs(
                    native.as_ptr(),
                    source_crs.as_ptr(),
                    target_crs.as_ptr(),
                    area_ptr,
                )
            })
        })?;
        Ok(Pj::from_raw(self.clone(), raw))
    }

    /// Create a transformation between two CRS objects, which may belong to other
    /// contexts. The result belongs to this context.
    ///
    /// `options` are `KEY=VALUE` strings as documented for
    /// `proj_create_crs_to_crs_from_pj`, e.g. `ALLOW_BALLPARK=NO`.
    pub fn new_crs_to_crs_from_pj(
        &self,
        source: &Pj,
        target: &Pj,
        area: Option<&Area>,
        options: &[&str],
    ) -> Result<Pj, ProjError> {
        let options = CStringArray::try_from_iter(options.iter().copied())?;
        let (_area, area_ptr) = native_area_ptr(area)?;
        let raw = {
            let locks = ContextLocks::acquire(&[self, source.context(), target.context()]);
            let native = locks.native(self)?;
            let source_ptr = locks.pj_ptr(source)?;
            let target_ptr = locks.pj_ptr(target)?;
            created(native, unsafe {
                proj_sys::proj_create_crs_to_crs_from_pj(
                    native.as_ptr(),
                    source_ptr,
                    target_ptr,
                    area_ptr,
                    options.as_ptr(),
                )
            })?
        };
        Ok(Pj::from_raw(self.clone(), raw))
    }

    /// Combine a horizontal and a vertical CRS, possibly from other contexts, into a
    /// compound CRS of this context. An empty `name` leaves the result unnamed.
    pub fn create_compound_crs(
        &self,
        name: &str,
        horizontal: &Pj,
        vertical: &Pj,
    ) -> Result<Pj, ProjError> {
        let name = (!name.is_empty()).then(|| CString::new(name)).transpose()?;
        let name_ptr = name.as_ref().map_or(ptr::null(), |name| name.as_ptr());
        let raw = {
            let locks =
                ContextLocks::acquire(&[self, horizontal.context(), vertical.context()]);
            let native = locks.native(self)?;
            let horizontal_ptr = locks.pj_ptr(horizontal)?;
            let vertical_ptr = locks.pj_ptr(vertical)?;
            created(native, unsafe {
                proj_sys::proj_create_compound_crs(
                    native.as_ptr(),
                    name_ptr,
                    horizontal_ptr,
                    vertical_ptr,
                )
            })?
        };
        Ok(Pj::from_raw(self.clone(), raw))
    }

    /// Authorities known to the database, e.g. `EPSG`, `ESRI`, `IGNF`. The order
    /// depends on the installed database.
    pub fn authorities_from_database(&self) -> Result<Vec<String>, ProjError> {
        self.with_native(authorities)
    }

    /// Codes of the non-deprecated CRS of one authority, without the authority prefix.
    pub fn crs_codes(&self, authority: &str) -> Result<Vec<String>, ProjError> {
        let authority = CString::new(authority)?;
        self.with_native(|native| crs_codes(native, &authority))
    }

    /// Every non-deprecated CRS of every authority, as `AUTH:CODE`.
    pub fn all_crs_codes(&self) -> Result<Vec<String>, ProjError> {
        self.with_native(|native| {
            let authorities =
                authorities(native).map_err(|err| err.context("failed to list authorities"))?;
            let mut all_codes = Vec::new();
            for authority in authorities {
                let c_authority = CString::new(authority.as_str())?;
                let codes = crs_codes(native, &c_authority).map_err(|err| {
                    err.context(format!("failed to list codes for authority {authority}"))
                })?;
                all_codes.extend(codes.into_iter().map(|code| format!("{authority}:{code}")));
            }
            Ok(all_codes)
        })
    }
}

/// Turn the result of a native constructor into an owned pointer, or the context's
/// error if it failed.
pub(crate) fn created(
    native: &ThreadContext,
    raw: *mut proj_sys::PJ,
) -> Result<ptr::NonNull<proj_sys::PJ>, ProjError> {
    ptr::NonNull::new(raw).ok_or_else(|| ProjError::creation(native.errno(), native))
}

fn authorities(native: &ThreadContext) -> Result<Vec<String>, ProjError> {
    let list =
        unsafe { NativeStringList::from_raw(proj_sys::proj_get_authorities_from_database(native.as_ptr())) }
            .ok_or_else(|| ProjError::native(native.errno(), native))?;
    Ok(list.to_vec()?)
}

fn crs_codes(native: &ThreadContext, authority: &CString) -> Result<Vec<String>, ProjError> {
    let list = unsafe {
        NativeStringList::from_raw(proj_sys::proj_get_codes_from_database(
            native.as_ptr(),
            authority.as_ptr(),
            PjType::Crs.to_native(),
            0,
        ))
    }
    .ok_or_else(|| ProjError::native(native.errno(), native))?;
    Ok(list.to_vec()?)
}

impl Default for Context {
    fn default() -> Self {
        Context::new()
    }
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Context {}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context").field("id", &self.id()).finish()
    }
}

/// The process-wide context used by the crate-level functions, created on first use.
pub fn default_context() -> &'static Context {
    DEFAULT_CONTEXT.get_or_init(Context::new)
}

/// The locks of several contexts, taken in ascending id order and at most once each.
pub(crate) struct ContextLocks<'a> {
    guards: Vec<(u64, NativeGuard<'a>)>,
}

impl<'a> ContextLocks<'a> {
    pub fn acquire(contexts: &[&'a Context]) -> Self {
        let mut ordered = contexts.to_vec();
        ordered.sort_by_key(|context| context.id());
        ordered.dedup_by_key(|context| context.id());
        let guards = ordered
            .into_iter()
            .map(|context| (context.id(), context.lock()))
            .collect();
        ContextLocks { guards }
    }

    /// The native context of `context`, which must be one of the locked ones.
    pub fn native(&self, context: &Context) -> Result<&ThreadContext, ProjError> {
        self.guards
            .iter()
            .find(|(id, _)| *id == context.id())
            .and_then(|(_, guard)| guard.as_ref())
            .ok_or(ProjError::ContextDestroyed)
    }

    /// The native object of `pj`, whose context must be one of the locked ones and
    /// still alive.
    pub fn pj_ptr(&self, pj: &Pj) -> Result<*mut proj_sys::PJ, ProjError> {
        self.native(pj.context())?;
        pj.raw()
    }
}

/// Configures a [`Context`] before first use.
///
/// ```
/// use proj_ctx::{ContextBuilder, LogLevel};
///
/// let ctx = ContextBuilder::default()
///     .log_level(LogLevel::Error)
///     .build()
///     .unwrap();
/// assert_eq!(ctx.log_level().unwrap(), LogLevel::Error);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ContextBuilder {
    log_level: Option<LogLevel>,
    search_paths: Option<Vec<String>>,
}

impl ContextBuilder {
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Directories to search for `proj.db` and grids, in order.
    pub fn search_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> Result<Context, ProjError> {
        let context = Context::new();
        if let Some(level) = self.log_level {
            context.set_log_level(level)?;
        }
        if let Some(paths) = self.search_paths {
            context.set_search_paths(paths)?;
        }
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coord;
    use approx::assert_relative_eq;
    use std::thread;

    #[test]
    fn test_new_context_is_silent() {
        let ctx = Context::new();
        assert_eq!(ctx.log_level().unwrap(), LogLevel::None);
        ctx.set_log_level(LogLevel::Debug).unwrap();
        assert_eq!(ctx.log_level().unwrap(), LogLevel::Debug);
        // Tell only queries.
        ctx.set_log_level(LogLevel::Tell).unwrap();
        assert_eq!(ctx.log_level().unwrap(), LogLevel::Debug);
    }

    #[test]
    fn test_context_ids_are_unique() {
        let a = Context::new();
        let b = Context::new();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone(), a);
        assert_ne!(a, b);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let ctx = Context::new();
        let pj = ctx.new_pj("EPSG:4326").unwrap();
        ctx.destroy();
        ctx.destroy();
        assert!(ctx.is_destroyed());
        assert!(matches!(ctx.new_pj("EPSG:4326"), Err(ProjError::ContextDestroyed)));
        assert!(matches!(pj.info(), Err(ProjError::ContextDestroyed)));
        // Released through the default context.
        pj.destroy();
        assert!(pj.is_destroyed());
    }

    #[test]
    fn test_default_context_survives_destroy() {
        default_context().destroy();
        assert!(!default_context().is_destroyed());
    }

    #[test]
    fn test_new_pj() {
        let ctx = Context::new();
        assert!(ctx.new_pj("epsg:4326").is_ok());
        assert!(ctx.new_pj("+proj=etmerc +lat_0=38 +lon_0=125 +ellps=bessel").is_ok());

        let err = ctx.new_pj("invalid").unwrap_err();
        assert!(matches!(err, ProjError::Creation { .. }));
        assert_eq!(err.to_string(), "Invalid PROJ string syntax");
        assert!(err.errno().is_some_and(|errno| errno != 0));
    }

    #[test]
    fn test_new_pj_nul_byte() {
        let ctx = Context::new();
        assert!(matches!(ctx.new_pj("EPSG\0:4326"), Err(ProjError::ArgumentNul(_))));
    }

    #[test]
    fn test_new_pj_from_args() {
        let ctx = Context::new();
        assert!(ctx.new_pj_from_args(["proj=utm", "zone=32", "ellps=GRS80"]).is_ok());

        let err = ctx
            .new_pj_from_args(["proj=utm", "zone=0", "ellps=GRS80"])
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for an argument");
    }

    #[test]
    fn test_set_search_paths() {
        let ctx = Context::new();
        ctx.set_search_paths(Vec::<String>::new()).unwrap();
        ctx.set_search_paths(["/tmp/data"]).unwrap();
        ctx.set_search_paths(["/tmp/data", "/tmp/data2"]).unwrap();
        assert!(matches!(
            ctx.set_search_paths(["/tmp/\0"]),
            Err(ProjError::ArgumentNul(_))
        ));
    }

    #[test]
    fn test_builder() {
        let ctx = Context::builder()
            .log_level(LogLevel::Error)
            .search_paths(Vec::<String>::new())
            .build()
            .unwrap();
        assert_eq!(ctx.log_level().unwrap(), LogLevel::Error);
        assert!(ctx.new_pj("EPSG:3857").is_ok());
    }

    #[test]
    fn test_duplicate_is_independent() {
        let ctx = Context::new();
        ctx.set_log_level(LogLevel::Error).unwrap();
        let copy = ctx.duplicate().unwrap();
        assert_ne!(copy.id(), ctx.id());
        ctx.destroy();
        assert!(copy.new_pj("EPSG:4326").is_ok());
    }

    #[test]
    fn test_new_crs_to_crs_with_area() {
        let ctx = Context::new();
        let area = Area::new(14.0, 49.0, 24.2, 55.0);
        let pj = ctx
            .new_crs_to_crs("EPSG:4326", "EPSG:2180", Some(&area))
            .unwrap();
        let gdansk = pj.forward(Coord::new(54.371652, 18.612462, 11.1, 0.0)).unwrap();
        assert_relative_eq!(gdansk.x(), 723134.1266446244, epsilon = 1e-3);
        assert_relative_eq!(gdansk.y(), 474831.4869142064, epsilon = 1e-3);
    }

    #[test]
    fn test_new_crs_to_crs_with_named_area() {
        let ctx = Context::new();
        let area = Area::new(14.0, 49.0, 24.2, 55.0).with_name("Poland");
        let result = ctx.new_crs_to_crs("EPSG:4326", "EPSG:2180", Some(&area));
        if cfg!(feature = "proj_9_6") {
            let gdansk = result
                .unwrap()
                .forward(Coord::new(54.371652, 18.612462, 11.1, 0.0))
                .unwrap();
            assert_relative_eq!(gdansk.x(), 723134.1266446244, epsilon = 1e-3);
        } else {
            assert!(matches!(result, Err(ProjError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_new_crs_to_crs_unknown_crs() {
        let ctx = Context::new();
        let err = ctx
            .new_crs_to_crs("EPSG:4326", "EPSG:0", None)
            .unwrap_err();
        assert!(matches!(err, ProjError::Creation { .. }));
    }

    #[test]
    fn test_new_crs_to_crs_from_pj_across_contexts() {
        let ctx = Context::new();
        let other = Context::new();
        let source = other.new_pj("epsg:4326").unwrap();
        let target = ctx.new_pj("epsg:3857").unwrap();
        assert!(source.is_crs().unwrap());

        let pj = ctx
            .new_crs_to_crs_from_pj(&source, &target, None, &[])
            .unwrap();
        assert_eq!(pj.context(), &ctx);
        let paris = pj.forward(Coord::new(48.856613, 2.352222, 78.0, 0.0)).unwrap();
        assert_relative_eq!(paris.x(), 261848.15527273554, epsilon = 1e-3);
        assert_relative_eq!(paris.y(), 6250566.54904563, epsilon = 1e-3);

        other.destroy();
        assert!(matches!(
            ctx.new_crs_to_crs_from_pj(&source, &target, None, &[]),
            Err(ProjError::ContextDestroyed)
        ));
    }

    #[test]
    fn test_new_crs_to_crs_from_destroyed_pj() {
        let ctx = Context::new();
        let source = ctx.new_pj("epsg:4326").unwrap();
        let target = ctx.new_pj("epsg:3857").unwrap();
        target.destroy();
        assert!(matches!(
            ctx.new_crs_to_crs_from_pj(&source, &target, None, &["ALLOW_BALLPARK=NO"]),
            Err(ProjError::PjDestroyed)
        ));
    }

    #[test]
    fn test_opposite_cross_context_composition_does_not_deadlock() {
        let a = Context::new();
        let b = Context::new();
        let in_a = a.new_pj("EPSG:4326").unwrap();
        let in_b = b.new_pj("EPSG:3857").unwrap();

        thread::scope(|scope| {
            scope.spawn(|| {
                for _ in 0..50 {
                    a.new_crs_to_crs_from_pj(&in_a, &in_b, None, &[]).unwrap();
                }
            });
            scope.spawn(|| {
                for _ in 0..50 {
                    b.new_crs_to_crs_from_pj(&in_b, &in_a, None, &[]).unwrap();
                }
            });
        });
    }

    #[test]
    fn test_create_compound_crs() {
        let ctx = Context::new();
        let horizontal = ctx.new_pj("EPSG:4326").unwrap();
        // EVRF2007 height (Europe), EPSG:5621
        let vertical = ctx
            .new_pj(
                r#"VERT_CS["EVRF2007 height",
    VERT_DATUM["European Vertical Reference Frame 2007",2005,
        AUTHORITY["EPSG","5215"]],
    UNIT["metre",1,
        AUTHORITY["EPSG","9001"]],
    AXIS["Gravity-related height",UP],
    AUTHORITY["EPSG","5621"]]"#,
            )
            .unwrap();

        let compound = ctx.create_compound_crs("", &horizontal, &vertical).unwrap();
        assert_eq!(compound.pj_type().unwrap(), crate::PjType::CompoundCrs);
        let other_compound = ctx.new_pj("EPSG:4326+9390").unwrap();
        let pj = ctx
            .new_crs_to_crs_from_pj(&compound, &other_compound, None, &[])
            .unwrap();
        assert!(pj.forward(Coord::new(10.0, 54.0, 42.0, 0.0)).is_ok());

        let named = ctx
            .create_compound_crs("WGS 84 + EVRF2007 height", &horizontal, &vertical)
            .unwrap();
        assert_eq!(named.info().unwrap().description, "WGS 84 + EVRF2007 height");
    }

    #[test]
    fn test_authorities_from_database() {
        let authorities = Context::new().authorities_from_database().unwrap();
        for expected in ["EPSG", "ESRI", "IGNF", "OGC", "PROJ"] {
            assert!(authorities.iter().any(|auth| auth == expected), "{expected}");
        }
    }

    #[test]
    fn test_crs_codes() {
        let ctx = Context::new();
        let epsg = ctx.crs_codes("EPSG").unwrap();
        assert!(epsg.iter().any(|code| code == "4326"));

        let all = ctx.all_crs_codes().unwrap();
        assert!(all.len() > 10_000);
        assert!(all.iter().any(|code| code == "EPSG:4326"));
        assert!(all.iter().any(|code| code == "OGC:CRS84"));
    }
}
