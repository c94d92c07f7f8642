use crate::area::AreaOfUse;
use crate::context::{Context, ThreadContext, default_context};
use crate::coord::Coord;
use crate::errno::{ErrnoScope, ProjError};
use crate::info::{PjInfo, PjType, Srid, WktType};
use log::{trace, warn};
use std::fmt;
use std::ptr::{self, NonNull};
use std::sync::atomic::{AtomicPtr, Ordering};

/// A PROJ object: a CRS, a coordinate operation, or any other object PROJ can create.
///
/// Objects are only created through a [`Context`] and keep it alive. Every call locks
/// that context, so objects can be used from several threads.
///
/// The native object is released by [`Pj::destroy`] or on drop.
pub struct Pj {
    ctx: Context,
    /// Null once destroyed. Only read or swapped while `ctx` is locked.
    pj: AtomicPtr<proj_sys::PJ>,
}

impl Pj {
    /// Take ownership of a native object created on `ctx`.
    pub(crate) fn from_raw(ctx: Context, raw: NonNull<proj_sys::PJ>) -> Self {
        trace!("created PROJ object {:p} on context {}", raw, ctx.id());
        Pj {
            ctx,
            pj: AtomicPtr::new(raw.as_ptr()),
        }
    }

    /// The context that created this object.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// The native pointer. The caller must hold the lock of [`Pj::context`].
    pub(crate) fn raw(&self) -> Result<*mut proj_sys::PJ, ProjError> {
        let raw = self.pj.load(Ordering::Acquire);
        if raw.is_null() {
            Err(ProjError::PjDestroyed)
        } else {
            Ok(raw)
        }
    }

    /// Run `f` with the owning context locked and the native object.
    ///
    /// `f` must not drop a `Pj` of the same context.
    pub(crate) fn with_handle<T>(
        &self,
        f: impl FnOnce(&ThreadContext, *mut proj_sys::PJ) -> Result<T, ProjError>,
    ) -> Result<T, ProjError> {
        self.ctx.with_native(|native| f(native, self.raw()?))
    }

    /// Like [`Pj::with_handle`], with the object's error number reset for the duration
    /// of `f` and restored afterwards.
    pub(crate) fn with_errno_scope<T>(
        &self,
        f: impl FnOnce(&ThreadContext, *mut proj_sys::PJ, &ErrnoScope) -> Result<T, ProjError>,
    ) -> Result<T, ProjError> {
        self.with_handle(|native, raw| {
            let scope = ErrnoScope::enter(raw);
            f(native, raw, &scope)
        })
    }

    /// Release the native object now. Idempotent.
    pub fn destroy(&self) {
        let guard = self.ctx.lock();
        let raw = self.pj.swap(ptr::null_mut(), Ordering::AcqRel);
        if raw.is_null() {
            return;
        }
        if guard.is_some() {
            unsafe { proj_sys::proj_destroy(raw) };
            trace!("destroyed PROJ object {:p} on context {}", raw, self.ctx.id());
        } else {
            drop(guard);
            release_orphan(raw, self.ctx.id());
        }
    }

    pub fn is_destroyed(&self) -> bool {
        let _guard = self.ctx.lock();
        self.pj.load(Ordering::Acquire).is_null()
    }

    /// A snapshot of PROJ's description of this object.
    pub fn info(&self) -> Result<PjInfo, ProjError> {
        self.with_handle(|_, raw| {
            let info = unsafe { proj_sys::proj_pj_info(raw) };
            Ok(PjInfo {
                id: unsafe { crate::_string(info.id) }?,
                description: unsafe { crate::_string(info.description) }?,
                definition: unsafe { crate::_string(info.definition) }?,
                has_inverse: info.has_inverse != 0,
                accuracy: info.accuracy,
            })
        })
    }

    pub fn is_crs(&self) -> Result<bool, ProjError> {
        self.with_handle(|_, raw| Ok(unsafe { proj_sys::proj_is_crs(raw) } != 0))
    }

    pub fn pj_type(&self) -> Result<PjType, ProjError> {
        self.with_handle(|_, raw| PjType::from_native(unsafe { proj_sys::proj_get_type(raw) }))
    }

    /// The first identifier of this object, or an empty [`Srid`] if it has none.
    pub fn srid(&self) -> Result<Srid, ProjError> {
        self.with_handle(|_, raw| {
            let auth = unsafe { crate::_string(proj_sys::proj_get_id_auth_name(raw, 0)) }?;
            let code = unsafe { crate::_string(proj_sys::proj_get_id_code(raw, 0)) }?;
            Ok(Srid { auth, code })
        })
    }

    /// The region where this object is valid; `None` if unknown.
    pub fn area_of_use(&self) -> Result<Option<AreaOfUse>, ProjError> {
        self.with_errno_scope(|native, raw, _| {
            let (mut west, mut south, mut east, mut north) = (0.0, 0.0, 0.0, 0.0);
            let mut name = ptr::null();
            let found = unsafe {
                proj_sys::proj_get_area_of_use(
                    native.as_ptr(),
                    raw,
                    &mut west,
                    &mut south,
                    &mut east,
                    &mut north,
                    &mut name,
                )
            };
            if found == 0 {
                return Ok(None);
            }
            Ok(Some(AreaOfUse {
                west_lon: west,
                south_lat: south,
                east_lon: east,
                north_lat: north,
                name: unsafe { crate::_string(name) }?,
            }))
        })
    }

    /// Export as multi-line WKT.
    ///
    /// Fails with [`ProjError::IncompatibleExport`] when the object has no
    /// representation in `wkt_type`.
    pub fn as_wkt(&self, wkt_type: WktType) -> Result<String, ProjError> {
        self.with_errno_scope(|native, raw, scope| {
            let wkt = unsafe {
                proj_sys::proj_as_wkt(native.as_ptr(), raw, wkt_type.to_native(), ptr::null())
            };
            scope.check(native, ProjError::native)?;
            if wkt.is_null() {
                return Err(ProjError::IncompatibleExport(wkt_type));
            }
            Ok(unsafe { crate::_string(wkt) }?)
        })
    }

    pub fn as_projjson(&self) -> Result<String, ProjError> {
        self.with_errno_scope(|native, raw, scope| {
            let json = unsafe { proj_sys::proj_as_projjson(native.as_ptr(), raw, ptr::null()) };
            scope.check(native, ProjError::native)?;
            if json.is_null() {
                return Err(ProjError::native(scope.errno(), native));
            }
            Ok(unsafe { crate::_string(json) }?)
        })
    }

    /// The operation that performed the last transformation on this object, which
    /// [`Context::new_crs_to_crs`] may choose among several candidates.
    pub fn last_used_operation(&self) -> Result<Pj, ProjError> {
        let raw = self.with_errno_scope(|native, raw, scope| {
            let operation = unsafe { proj_sys::proj_trans_get_last_used_operation(raw) };
            NonNull::new(operation).ok_or_else(|| ProjError::creation(scope.errno(), native))
        })?;
        Ok(Pj::from_raw(self.ctx.clone(), raw))
    }

    /// A new object with the axis order most GIS expect: longitude/easting first.
    /// `self` is left unchanged.
    pub fn normalize_for_visualization(&self) -> Result<Pj, ProjError> {
        let raw = self.with_errno_scope(|native, raw, scope| {
            let normalized =
                unsafe { proj_sys::proj_normalize_for_visualization(native.as_ptr(), raw) };
            NonNull::new(normalized).ok_or_else(|| ProjError::creation(scope.errno(), native))
        })?;
        Ok(Pj::from_raw(self.ctx.clone(), raw))
    }

    /// Geodesic distance in metres between two points in radians, on the ellipsoid of
    /// this object.
    pub fn lp_dist(&self, a: Coord, b: Coord) -> Result<f64, ProjError> {
        self.with_errno_scope(|native, raw, scope| {
            let distance = unsafe { proj_sys::proj_lp_dist(raw, a.to_pj(), b.to_pj()) };
            scope.check(native, ProjError::native)?;
            Ok(distance)
        })
    }

    /// Like [`Pj::lp_dist`], also accounting for the height difference.
    pub fn lpz_dist(&self, a: Coord, b: Coord) -> Result<f64, ProjError> {
        self.with_errno_scope(|native, raw, scope| {
            let distance = unsafe { proj_sys::proj_lpz_dist(raw, a.to_pj(), b.to_pj()) };
            scope.check(native, ProjError::native)?;
            Ok(distance)
        })
    }

    /// Geodesic distance in metres, forward azimuth and reverse azimuth in degrees
    /// between two points in radians.
    pub fn geod(&self, a: Coord, b: Coord) -> Result<(f64, f64, f64), ProjError> {
        self.with_errno_scope(|native, raw, scope| {
            let result = unsafe { proj_sys::proj_geod(raw, a.to_pj(), b.to_pj()) };
            scope.check(native, ProjError::native)?;
            let geod = unsafe { result.geod };
            Ok((geod.s, geod.a1, geod.a2))
        })
    }
}

/// Release an object whose context is already gone by moving it to the default
/// context first. `proj_destroy` needs a live context.
fn release_orphan(raw: *mut proj_sys::PJ, context_id: u64) {
    let fallback = default_context();
    if fallback.id() == context_id {
        warn!("leaking PROJ object {raw:p}: its context {context_id} is gone");
        return;
    }
    let guard = fallback.lock();
    match guard.as_ref() {
        Some(native) => {
            unsafe {
                proj_sys::proj_assign_context(raw, native.as_ptr());
                proj_sys::proj_destroy(raw);
            }
            trace!("destroyed PROJ object {raw:p} of destroyed context {context_id}");
        }
        None => warn!("leaking PROJ object {raw:p}: its context {context_id} is gone"),
    }
}

impl Drop for Pj {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl fmt::Debug for Pj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pj")
            .field("context", &self.ctx.id())
            .field("pj", &self.pj.load(Ordering::Relaxed))
            .finish()
    }
}

/// Native objects fetched while a context is locked, before they are wrapped in [`Pj`].
///
/// Wrapping has to wait until the lock is released, because dropping a `Pj` locks its
/// context. Whatever is not adopted is destroyed on drop, which must then happen with
/// the context still locked.
#[derive(Default)]
pub(crate) struct PendingPjs(Vec<NonNull<proj_sys::PJ>>);

impl PendingPjs {
    pub fn push(&mut self, raw: NonNull<proj_sys::PJ>) {
        self.0.push(raw);
    }

    /// Wrap every pending object. Call after the context lock is released.
    pub fn adopt(mut self, ctx: &Context) -> Vec<Pj> {
        std::mem::take(&mut self.0)
            .into_iter()
            .map(|raw| Pj::from_raw(ctx.clone(), raw))
            .collect()
    }
}

impl Drop for PendingPjs {
    fn drop(&mut self) {
        for raw in self.0.drain(..) {
            unsafe { proj_sys::proj_destroy(raw.as_ptr()) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_info() {
        let ctx = Context::new();
        let pj = ctx.new_pj("epsg:2056").unwrap();
        let info = pj.info().unwrap();
        assert_eq!(info.description, "CH1903+ / LV95");
        assert_eq!(info.accuracy, -1.0);

        let merc = ctx.new_pj("+proj=merc +ellps=WGS84").unwrap().info().unwrap();
        assert_eq!(merc.id, "merc");
        assert!(merc.has_inverse);
        assert!(merc.definition.contains("proj=merc"));
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let pj = Context::new().new_pj("EPSG:4326").unwrap();
        pj.destroy();
        pj.destroy();
        assert!(pj.is_destroyed());
        assert!(matches!(pj.info(), Err(ProjError::PjDestroyed)));
        assert!(matches!(pj.srid(), Err(ProjError::PjDestroyed)));
    }

    #[test]
    fn test_pj_keeps_context_alive() {
        let pj = {
            let ctx = Context::new();
            ctx.new_pj("EPSG:4326").unwrap()
        };
        assert!(!pj.context().is_destroyed());
        assert!(pj.is_crs().unwrap());
    }

    #[test]
    fn test_pj_type() {
        let ctx = Context::new();
        let cases = [
            ("EPSG:4326", PjType::Geographic2dCrs),
            ("EPSG:4979", PjType::Geographic3dCrs),
            ("EPSG:4978", PjType::GeocentricCrs),
            ("EPSG:3857", PjType::ProjectedCrs),
            ("EPSG:5773", PjType::VerticalCrs),
            ("EPSG:4326+5773", PjType::CompoundCrs),
            ("EPSG:6269", PjType::GeodeticReferenceFrame),
            ("EPSG:7030", PjType::Ellipsoid),
            ("EPSG:8901", PjType::PrimeMeridian),
        ];
        for (definition, expected) in cases {
            let pj = ctx.new_pj(definition).unwrap();
            assert_eq!(pj.pj_type().unwrap(), expected, "{definition}");
            assert_eq!(pj.is_crs().unwrap(), expected.is_crs(), "{definition}");
        }
        let operation = ctx.new_pj("+proj=merc +ellps=WGS84").unwrap();
        assert!(!operation.is_crs().unwrap());
    }

    #[test]
    fn test_srid() {
        let ctx = Context::new();
        assert_eq!(
            ctx.new_pj("EPSG:4326").unwrap().srid().unwrap().to_string(),
            "EPSG:4326"
        );
        assert_eq!(
            ctx.new_pj("OGC:CRS84").unwrap().srid().unwrap(),
            Srid::new("OGC", "CRS84")
        );
        let unknown = ctx.new_pj("+proj=longlat +ellps=GRS80 +type=crs").unwrap();
        assert!(unknown.srid().unwrap().is_unknown());
    }

    #[test]
    fn test_area_of_use() {
        let ctx = Context::new();
        let area = ctx.new_pj("EPSG:2056").unwrap().area_of_use().unwrap().unwrap();
        assert!(area.name.contains("Liechtenstein"));
        assert!(area.west_lon < area.east_lon);
        assert!(area.south_lat < area.north_lat);

        let proj_string = ctx.new_pj("+proj=merc +ellps=WGS84").unwrap();
        assert_eq!(proj_string.area_of_use().unwrap(), None);
    }

    #[test]
    fn test_as_wkt() {
        let ctx = Context::new();
        let pj = ctx.new_pj("EPSG:4326").unwrap();
        let wkt = pj.as_wkt(WktType::Wkt2_2019).unwrap();
        assert!(wkt.starts_with("GEOGCRS[\"WGS 84\""));
        let esri = pj.as_wkt(WktType::Wkt1Esri).unwrap();
        assert!(esri.starts_with("GEOGCS["));

        // A set of candidate operations has no WKT form.
        let candidates = ctx.new_crs_to_crs("EPSG:4267", "EPSG:4269", None).unwrap();
        assert!(matches!(
            candidates.as_wkt(WktType::Wkt2_2019),
            Err(ProjError::IncompatibleExport(WktType::Wkt2_2019))
        ));
    }

    #[test]
    fn test_as_projjson() {
        let pj = Context::new().new_pj("EPSG:4326").unwrap();
        let json = pj.as_projjson().unwrap();
        assert!(json.contains("\"type\": \"GeographicCRS\""));
        assert!(json.contains("\"code\": 4326"));
    }

    #[test]
    fn test_last_used_operation() {
        let ctx = Context::new();
        // NAD27 to NAD83 has many candidate operations.
        let pj = ctx.new_crs_to_crs("EPSG:4267", "EPSG:4269", None).unwrap();
        assert!(pj.last_used_operation().is_err());

        pj.forward(Coord::new(40.712778, -74.006111, 0.0, 0.0)).unwrap();
        let operation = pj.last_used_operation().unwrap();
        assert!(!operation.is_crs().unwrap());
        assert!(!operation.info().unwrap().description.is_empty());
    }

    #[test]
    fn test_normalize_for_visualization_northing_easting() {
        let ctx = Context::new();
        let pj = ctx.new_crs_to_crs("EPSG:4326", "EPSG:3857", None).unwrap();
        let normalized = pj.normalize_for_visualization().unwrap();
        pj.destroy();

        // Longitude first after normalization.
        let new_york = normalized
            .forward(Coord::new(-74.006111, 40.712778, 0.0, 0.0))
            .unwrap();
        assert_relative_eq!(new_york.x(), -8238322.592110482, epsilon = 1e-3);
        assert_relative_eq!(new_york.y(), 4970068.348185822, epsilon = 1e-3);
    }

    #[test]
    fn test_normalize_for_visualization_easting_northing() {
        let ctx = Context::new();
        let pj = ctx.new_crs_to_crs("EPSG:2056", "EPSG:3857", None).unwrap();
        let normalized = pj.normalize_for_visualization().unwrap();
        let bern = Coord::new(2600670.0, 1199667.0, 0.0, 0.0);
        let a = pj.forward(bern).unwrap();
        let b = normalized.forward(bern).unwrap();
        assert_relative_eq!(a.x(), b.x(), epsilon = 1e-6);
        assert_relative_eq!(a.y(), b.y(), epsilon = 1e-6);
    }

    #[test]
    fn test_normalize_for_visualization_reports_its_own_error() {
        let ctx = Context::new();
        assert!(ctx.new_pj("invalid").is_err());
        let ellipsoid = ctx.new_pj("EPSG:7030").unwrap();

        let err = ellipsoid.normalize_for_visualization().unwrap_err();
        assert!(matches!(err, ProjError::Creation { .. }));
        let errno = err.errno().unwrap();
        assert_ne!(errno, 0);
        // 1025 is the invalid proj-string error of the earlier call.
        assert_ne!(errno, 1025);
        assert_ne!(err.to_string(), "Invalid PROJ string syntax");
    }

    #[test]
    fn test_geodesics() {
        let pj = Context::new().new_pj("epsg:4326").unwrap();
        let bern = Coord::new(46.948056, 7.4475, 540.0, 0.0).to_radians();
        let zurich = Coord::new(47.374444, 8.541111, 408.0, 0.0).to_radians();

        assert_relative_eq!(pj.lp_dist(bern, zurich).unwrap(), 129762.08359988699, epsilon = 1e-6);
        assert_relative_eq!(pj.lp_dist(zurich, bern).unwrap(), 129762.08359988699, epsilon = 1e-6);
        assert_relative_eq!(pj.lpz_dist(bern, zurich).unwrap(), 129762.15073812571, epsilon = 1e-6);

        let (distance, forward_azimuth, reverse_azimuth) = pj.geod(bern, zurich).unwrap();
        assert_relative_eq!(distance, 129762.08359988699, epsilon = 1e-6);
        assert_relative_eq!(forward_azimuth, 21.20947946541022, epsilon = 1e-9);
        assert_relative_eq!(reverse_azimuth, 21.268782222540885, epsilon = 1e-9);

        let (_, back_forward, back_reverse) = pj.geod(zurich, bern).unwrap();
        assert_relative_eq!(180.0 + back_reverse, forward_azimuth, epsilon = 1e-9);
        assert_relative_eq!(180.0 + back_forward, reverse_azimuth, epsilon = 1e-9);
    }

    #[test]
    fn test_concurrent_use() {
        let pj = Context::new()
            .new_crs_to_crs("EPSG:4326", "EPSG:3857", None)
            .unwrap();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..100 {
                        let p = pj.forward(Coord::new(48.856613, 2.352222, 0.0, 0.0)).unwrap();
                        assert_relative_eq!(p.x(), 261848.15527273554, epsilon = 1e-3);
                        assert!(pj.forward(Coord::new(91.0, 0.0, 0.0, 0.0)).is_err());
                    }
                });
            }
        });
    }
}
