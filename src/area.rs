use crate::errno::ProjError;
use std::ptr;

/// Area of interest used to pick among candidate operations when creating a
/// transformation. Degrees, longitudes may cross the antimeridian (`west > east`).
#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    pub west_lon: f64,
    pub south_lat: f64,
    pub east_lon: f64,
    pub north_lat: f64,
    /// Shown in PROJ's diagnostics. Passing a named area needs the `proj_9_6` feature.
    pub name: Option<String>,
}

impl Area {
    pub const fn new(west_lon: f64, south_lat: f64, east_lon: f64, north_lat: f64) -> Self {
        Area {
            west_lon,
            south_lat,
            east_lon,
            north_lat,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub(crate) fn to_native(&self) -> Result<NativeArea, ProjError> {
        let raw = unsafe { proj_sys::proj_area_create() };
        let area = ptr::NonNull::new(raw)
            .map(NativeArea)
            .ok_or(ProjError::Allocation("PJ_AREA"))?;
        unsafe {
            proj_sys::proj_area_set_bbox(
                area.as_ptr(),
                self.west_lon,
                self.south_lat,
                self.east_lon,
                self.north_lat,
            )
        };
        if let Some(name) = &self.name {
            area.set_name(name)?;
        }
        Ok(area)
    }
}

/// Owned `PJ_AREA`, destroyed on drop.
pub(crate) struct NativeArea(ptr::NonNull<proj_sys::PJ_AREA>);

impl NativeArea {
    pub fn as_ptr(&self) -> *mut proj_sys::PJ_AREA {
        self.0.as_ptr()
    }

    /// PROJ copies the name.
    #[cfg(feature = "proj_9_6")]
    fn set_name(&self, name: &str) -> Result<(), ProjError> {
        let name = std::ffi::CString::new(name)?;
        unsafe { proj_sys::proj_area_set_name(self.as_ptr(), name.as_ptr()) };
        Ok(())
    }

    #[cfg(not(feature = "proj_9_6"))]
    fn set_name(&self, name: &str) -> Result<(), ProjError> {
        Err(ProjError::InvalidArgument(format!(
            "area name {name:?} needs PROJ 9.6, enable the `proj_9_6` feature"
        )))
    }
}

impl Drop for NativeArea {
    fn drop(&mut self) {
        unsafe { proj_sys::proj_area_destroy(self.0.as_ptr()) };
    }
}

/// Convert an optional area into the pointer PROJ expects, keeping the owner alive in
/// the returned guard.
pub(crate) fn native_area_ptr(
    area: Option<&Area>,
) -> Result<(Option<NativeArea>, *mut proj_sys::PJ_AREA), ProjError> {
    let native = area.map(|area| area.to_native()).transpose()?;
    let ptr = native
        .as_ref()
        .map_or(ptr::null_mut(), NativeArea::as_ptr);
    Ok((native, ptr))
}

/// Geographic extent in which a CRS or operation is valid, in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaOfUse {
    pub west_lon: f64,
    pub south_lat: f64,
    pub east_lon: f64,
    pub north_lat: f64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_area() {
        let area = Area::new(-180.0, -85.0, 180.0, 85.0);
        let native = area.to_native().unwrap();
        assert!(!native.as_ptr().is_null());
    }

    #[test]
    fn test_area_name() {
        let area = Area::new(14.0, 49.0, 24.2, 55.0).with_name("Poland");
        assert_eq!(area.name.as_deref(), Some("Poland"));

        let result = native_area_ptr(Some(&area));
        if cfg!(feature = "proj_9_6") {
            let (guard, ptr) = result.unwrap();
            assert!(guard.is_some());
            assert!(!ptr.is_null());
        } else {
            assert!(matches!(result, Err(ProjError::InvalidArgument(_))));
        }
    }

    #[cfg(feature = "proj_9_6")]
    #[test]
    fn test_area_name_nul_byte() {
        let area = Area::new(14.0, 49.0, 24.2, 55.0).with_name("Pol\0and");
        assert!(matches!(area.to_native(), Err(ProjError::ArgumentNul(_))));
    }

    #[test]
    fn test_native_area_ptr_none_is_null() {
        let (guard, ptr) = native_area_ptr(None).unwrap();
        assert!(guard.is_none());
        assert!(ptr.is_null());
    }
}
