use crate::errno::ProjError;
use crate::info::{FullPjInfo, IdentifyMatch, IdentifyMatchInfo};
use crate::pj::{PendingPjs, Pj};
use libc::c_int;
use std::ffi::CString;
use std::ptr::{self, NonNull};

/// Upper bound on the components [`Pj::list_sub_crs`] collects before giving up.
pub const MAX_SUB_CRS: usize = 100;

/// The list and confidence array returned by `proj_identify`, destroyed together.
struct IdentifyResult {
    list: *mut proj_sys::PJ_OBJ_LIST,
    confidence: *mut c_int,
}

impl Drop for IdentifyResult {
    fn drop(&mut self) {
        unsafe {
            if !self.list.is_null() {
                proj_sys::proj_list_destroy(self.list);
            }
            if !self.confidence.is_null() {
                proj_sys::proj_int_list_destroy(self.confidence);
            }
        }
    }
}

impl Pj {
    /// The component at `index` of a compound or bound CRS, or `None` past the last.
    pub fn sub_crs(&self, index: usize) -> Result<Option<Pj>, ProjError> {
        let c_index = c_int::try_from(index)
            .map_err(|_| ProjError::InvalidArgument(format!("sub-CRS index {index}")))?;
        let raw = self
            .with_errno_scope(|native, raw, scope| {
                let sub = unsafe { proj_sys::proj_crs_get_sub_crs(native.as_ptr(), raw, c_index) };
                let sub = NonNull::new(sub);
                if let Err(err) = scope.check(native, ProjError::native) {
                    if let Some(sub) = sub {
                        unsafe { proj_sys::proj_destroy(sub.as_ptr()) };
                    }
                    return Err(err);
                }
                Ok(sub)
            })
            .map_err(|err| err.context(format!("failed to get sub-CRS {index}")))?;
        Ok(raw.map(|raw| Pj::from_raw(self.context().clone(), raw)))
    }

    /// Every component of a compound or bound CRS, in order.
    ///
    /// Stops at the first missing index; fails with [`ProjError::SubCrsLimit`] if PROJ
    /// keeps returning components past [`MAX_SUB_CRS`].
    pub fn list_sub_crs(&self) -> Result<Vec<Pj>, ProjError> {
        let mut components = Vec::new();
        for index in 0..MAX_SUB_CRS {
            match self.sub_crs(index)? {
                Some(component) => components.push(component),
                None => return Ok(components),
            }
        }
        Err(ProjError::SubCrsLimit(MAX_SUB_CRS))
    }

    /// Database objects matching this CRS, with PROJ's confidence in each.
    pub fn identify(&self) -> Result<Vec<IdentifyMatch>, ProjError> {
        self.identify_with_authority(None)
    }

    /// Like [`Pj::identify`], only searching the objects of `authority`, e.g. `EPSG`.
    pub fn identify_with_authority(
        &self,
        authority: Option<&str>,
    ) -> Result<Vec<IdentifyMatch>, ProjError> {
        let authority = authority.map(CString::new).transpose()?;
        let authority_ptr = authority.as_ref().map_or(ptr::null(), |auth| auth.as_ptr());
        let (pending, confidences) = self.with_errno_scope(|native, raw, scope| {
            let mut result = IdentifyResult {
                list: ptr::null_mut(),
                confidence: ptr::null_mut(),
            };
            result.list = unsafe {
                proj_sys::proj_identify(
                    native.as_ptr(),
                    raw,
                    authority_ptr,
                    ptr::null(),
                    &mut result.confidence,
                )
            };
            scope.check(native, ProjError::native)?;

            let mut pending = PendingPjs::default();
            let mut confidences = Vec::new();
            if result.list.is_null() {
                return Ok((pending, confidences));
            }
            let count = unsafe { proj_sys::proj_list_get_count(result.list) };
            for index in 0..count {
                let item = unsafe { proj_sys::proj_list_get(native.as_ptr(), result.list, index) };
                let item = NonNull::new(item);
                if let Err(err) = scope.check(native, ProjError::native) {
                    if let Some(item) = item {
                        unsafe { proj_sys::proj_destroy(item.as_ptr()) };
                    }
                    return Err(err.context(format!("failed to get identify match {index}")));
                }
                let Some(item) = item else {
                    return Err(ProjError::native(scope.errno(), native)
                        .context(format!("failed to get identify match {index}")));
                };
                pending.push(item);
                confidences.push(if result.confidence.is_null() {
                    0
                } else {
                    unsafe { *result.confidence.add(index as usize) }
                });
            }
            Ok((pending, confidences))
        })?;
        Ok(pending
            .adopt(self.context())
            .into_iter()
            .zip(confidences)
            .map(|(pj, confidence)| IdentifyMatch { pj, confidence })
            .collect())
    }

    /// Info, type, area of use and, for a CRS, its database matches, in one call.
    pub fn full_info(&self) -> Result<FullPjInfo, ProjError> {
        let info = self.info()?;
        let is_crs = self.is_crs()?;
        let pj_type = self
            .pj_type()
            .map_err(|err| err.context("failed to get PJ type"))?;
        let area_of_use = self.area_of_use()?;

        let mut crs_matches = Vec::new();
        if is_crs {
            let matches = self
                .identify()
                .map_err(|err| err.context("failed to identify CRS"))?;
            for IdentifyMatch { pj, confidence } in matches {
                crs_matches.push(IdentifyMatchInfo {
                    srid: pj.srid()?,
                    description: pj.info()?.description,
                    confidence,
                });
            }
        }

        Ok(FullPjInfo {
            info,
            is_crs,
            pj_type,
            area_of_use,
            crs_matches,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{Context, PjType, ProjError, Srid};

    #[test]
    fn test_list_sub_crs() {
        let ctx = Context::new();
        let compound = ctx.new_pj("EPSG:4326+5773").unwrap();
        let components = compound.list_sub_crs().unwrap();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].srid().unwrap(), Srid::new("EPSG", "4326"));
        assert_eq!(components[1].srid().unwrap(), Srid::new("EPSG", "5773"));
        assert_eq!(components[1].pj_type().unwrap(), PjType::VerticalCrs);
        assert!(compound.sub_crs(2).unwrap().is_none());
    }

    #[test]
    fn test_sub_crs_of_simple_crs() {
        let ctx = Context::new();
        let geographic = ctx.new_pj("EPSG:4326").unwrap();
        let err = geographic.sub_crs(0).unwrap_err();
        assert!(err.to_string().starts_with("failed to get sub-CRS 0"));
        assert!(err.errno().is_some());
        // The failed probe leaves no error behind.
        assert!(geographic.as_wkt(crate::WktType::Wkt2_2019).is_ok());
    }

    #[test]
    fn test_identify() {
        let ctx = Context::new();
        let pj = ctx
            .new_pj(
                r#"GEOGCRS["WGS 84",
    DATUM["World Geodetic System 1984",
        ELLIPSOID["WGS 84",6378137,298.257223563,LENGTHUNIT["metre",1]]],
    PRIMEM["Greenwich",0,ANGLEUNIT["degree",0.0174532925199433]],
    CS[ellipsoidal,2],
        AXIS["geodetic latitude (Lat)",north,ORDER[1],ANGLEUNIT["degree",0.0174532925199433]],
        AXIS["geodetic longitude (Lon)",east,ORDER[2],ANGLEUNIT["degree",0.0174532925199433]]]"#,
            )
            .unwrap();
        let matches = pj.identify().unwrap();
        let best = matches
            .iter()
            .find(|m| m.pj.srid().unwrap() == Srid::new("EPSG", "4326"))
            .unwrap();
        assert_eq!(best.confidence, 100);
        assert_eq!(best.pj.context(), &ctx);

        let only_ogc = pj.identify_with_authority(Some("OGC")).unwrap();
        assert!(only_ogc.iter().all(|m| m.pj.srid().unwrap().auth == "OGC"));
    }

    #[test]
    fn test_identify_unknown_authority() {
        let pj = Context::new().new_pj("EPSG:4326").unwrap();
        // PROJ answers with an empty list rather than an error.
        let unknown = pj.identify_with_authority(Some("NOT_AN_AUTHORITY")).unwrap();
        assert!(unknown.is_empty());

        let epsg = pj.identify_with_authority(Some("EPSG")).unwrap();
        assert!(
            epsg.iter()
                .any(|m| m.pj.srid().unwrap() == Srid::new("EPSG", "4326") && m.confidence == 100)
        );
        // Nothing is left behind for the next call.
        assert!(pj.as_wkt(crate::WktType::Wkt2_2019).is_ok());

        assert!(matches!(
            pj.identify_with_authority(Some("EP\0SG")),
            Err(ProjError::ArgumentNul(_))
        ));
    }

    #[test]
    fn test_full_info_geocentric() {
        let ctx = Context::new();
        let pj = ctx
            .new_pj(
                r#"GEODCRS["TWD97",DATUM["Taiwan Datum 1997",ELLIPSOID["GRS 1980",6378137,298.257222101,LENGTHUNIT["metre",1]]],PRIMEM["Greenwich",0,ANGLEUNIT["degree",0.0174532925199433]],CS[Cartesian,3],AXIS["(X)",geocentricX,ORDER[1],LENGTHUNIT["metre",1]],AXIS["(Y)",geocentricY,ORDER[2],LENGTHUNIT["metre",1]],AXIS["(Z)",geocentricZ,ORDER[3],LENGTHUNIT["metre",1]],USAGE[SCOPE["Geodesy."],AREA["Taiwan, Republic of China - onshore and offshore - Taiwan Island, Penghu (Pescadores) Islands."],BBOX[17.36,114.32,26.96,123.61]],ID["EPSG",3822]]"#,
            )
            .unwrap();
        let info = pj.full_info().unwrap();
        assert_eq!(info.info.description, "TWD97");
        assert_eq!(info.info.accuracy, -1.0);
        assert!(info.is_crs);
        assert_eq!(info.pj_type, PjType::GeocentricCrs);

        let area = info.area_of_use.unwrap();
        assert_eq!(area.west_lon, 114.32);
        assert_eq!(area.south_lat, 17.36);
        assert_eq!(area.east_lon, 123.61);
        assert_eq!(area.north_lat, 26.96);
        assert!(area.name.starts_with("Taiwan, Republic of China"));

        let exact = info
            .crs_matches
            .iter()
            .find(|m| m.srid == Srid::new("EPSG", "3822"))
            .unwrap();
        assert_eq!(exact.confidence, 100);
    }

    #[test]
    fn test_full_info_compound() {
        let ctx = Context::new();
        let info = ctx.new_pj("EPSG:9707").unwrap().full_info().unwrap();
        assert_eq!(info.pj_type, PjType::CompoundCrs);
        assert!(
            info.crs_matches
                .iter()
                .any(|m| m.srid == Srid::new("EPSG", "9707") && m.confidence == 100)
        );
    }

    #[test]
    fn test_full_info_not_a_crs() {
        let ctx = Context::new();
        let info = ctx.new_pj("+proj=merc +ellps=WGS84").unwrap().full_info().unwrap();
        assert!(!info.is_crs);
        assert!(info.crs_matches.is_empty());
        assert_eq!(info.info.id, "merc");
    }
}
