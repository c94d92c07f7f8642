use crate::area::AreaOfUse;
use crate::errno::ProjError;
use crate::pj::Pj;
use std::fmt;

/// Snapshot of `proj_pj_info`. Recomputed on every call.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PjInfo {
    /// Short id of the operation, what follows `+proj=` in a proj-string, e.g. `merc`.
    pub id: String,
    /// Long description, e.g. `Mercator Cyl, Sph&Ell lat_ts=`, or the name of a CRS.
    pub description: String,
    /// The proj-string the object was created from, if any.
    pub definition: String,
    pub has_inverse: bool,
    /// Expected accuracy in metres, `-1.0` when unknown.
    pub accuracy: f64,
}

/// Authority and code identifying a catalogued object, e.g. `EPSG` / `4326`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Srid {
    pub auth: String,
    pub code: String,
}

impl Srid {
    pub fn new(auth: impl Into<String>, code: impl Into<String>) -> Self {
        Srid {
            auth: auth.into(),
            code: code.into(),
        }
    }

    /// Both parts empty: the object has no identifier.
    pub fn is_unknown(&self) -> bool {
        self.auth.is_empty() && self.code.is_empty()
    }
}

impl fmt::Display for Srid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            Ok(())
        } else {
            write!(f, "{}:{}", self.auth, self.code)
        }
    }
}

/// Kind of a PROJ object, as reported by `proj_get_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PjType {
    Unknown,
    Ellipsoid,
    PrimeMeridian,
    GeodeticReferenceFrame,
    DynamicGeodeticReferenceFrame,
    VerticalReferenceFrame,
    DynamicVerticalReferenceFrame,
    DatumEnsemble,
    /// Abstract type, never returned by `proj_get_type`.
    Crs,
    GeodeticCrs,
    GeocentricCrs,
    /// Abstract type, never returned by `proj_get_type`.
    GeographicCrs,
    Geographic2dCrs,
    Geographic3dCrs,
    VerticalCrs,
    ProjectedCrs,
    CompoundCrs,
    TemporalCrs,
    EngineeringCrs,
    BoundCrs,
    OtherCrs,
    Conversion,
    Transformation,
    ConcatenatedOperation,
    OtherCoordinateOperation,
    TemporalDatum,
    EngineeringDatum,
    ParametricDatum,
    DerivedProjectedCrs,
    CoordinateMetadata,
}

impl PjType {
    /// Map a native `PJ_TYPE`. Values this crate does not know about mean the linked
    /// PROJ is newer than these bindings, which is reported instead of guessed.
    pub(crate) fn from_native(value: proj_sys::PJ_TYPE) -> Result<Self, ProjError> {
        use PjType::*;
        let pj_type = match value {
            proj_sys::PJ_TYPE_PJ_TYPE_UNKNOWN => Unknown,
            proj_sys::PJ_TYPE_PJ_TYPE_ELLIPSOID => Ellipsoid,
            proj_sys::PJ_TYPE_PJ_TYPE_PRIME_MERIDIAN => PrimeMeridian,
            proj_sys::PJ_TYPE_PJ_TYPE_GEODETIC_REFERENCE_FRAME => GeodeticReferenceFrame,
            proj_sys::PJ_TYPE_PJ_TYPE_DYNAMIC_GEODETIC_REFERENCE_FRAME => {
                DynamicGeodeticReferenceFrame
            }
            proj_sys::PJ_TYPE_PJ_TYPE_VERTICAL_REFERENCE_FRAME => VerticalReferenceFrame,
            proj_sys::PJ_TYPE_PJ_TYPE_DYNAMIC_VERTICAL_REFERENCE_FRAME => {
                DynamicVerticalReferenceFrame
            }
            proj_sys::PJ_TYPE_PJ_TYPE_DATUM_ENSEMBLE => DatumEnsemble,
            proj_sys::PJ_TYPE_PJ_TYPE_CRS => Crs,
            proj_sys::PJ_TYPE_PJ_TYPE_GEODETIC_CRS => GeodeticCrs,
            proj_sys::PJ_TYPE_PJ_TYPE_GEOCENTRIC_CRS => GeocentricCrs,
            proj_sys::PJ_TYPE_PJ_TYPE_GEOGRAPHIC_CRS => GeographicCrs,
            proj_sys::PJ_TYPE_PJ_TYPE_GEOGRAPHIC_2D_CRS => Geographic2dCrs,
            proj_sys::PJ_TYPE_PJ_TYPE_GEOGRAPHIC_3D_CRS => Geographic3dCrs,
            proj_sys::PJ_TYPE_PJ_TYPE_VERTICAL_CRS => VerticalCrs,
            proj_sys::PJ_TYPE_PJ_TYPE_PROJECTED_CRS => ProjectedCrs,
            proj_sys::PJ_TYPE_PJ_TYPE_COMPOUND_CRS => CompoundCrs,
            proj_sys::PJ_TYPE_PJ_TYPE_TEMPORAL_CRS => TemporalCrs,
            proj_sys::PJ_TYPE_PJ_TYPE_ENGINEERING_CRS => EngineeringCrs,
            proj_sys::PJ_TYPE_PJ_TYPE_BOUND_CRS => BoundCrs,
            proj_sys::PJ_TYPE_PJ_TYPE_OTHER_CRS => OtherCrs,
            proj_sys::PJ_TYPE_PJ_TYPE_CONVERSION => Conversion,
            proj_sys::PJ_TYPE_PJ_TYPE_TRANSFORMATION => Transformation,
            proj_sys::PJ_TYPE_PJ_TYPE_CONCATENATED_OPERATION => ConcatenatedOperation,
            proj_sys::PJ_TYPE_PJ_TYPE_OTHER_COORDINATE_OPERATION => OtherCoordinateOperation,
            proj_sys::PJ_TYPE_PJ_TYPE_TEMPORAL_DATUM => TemporalDatum,
            proj_sys::PJ_TYPE_PJ_TYPE_ENGINEERING_DATUM => EngineeringDatum,
            proj_sys::PJ_TYPE_PJ_TYPE_PARAMETRIC_DATUM => ParametricDatum,
            proj_sys::PJ_TYPE_PJ_TYPE_DERIVED_PROJECTED_CRS => DerivedProjectedCrs,
            proj_sys::PJ_TYPE_PJ_TYPE_COORDINATE_METADATA => CoordinateMetadata,
            other => return Err(ProjError::UnexpectedType(other as u32)),
        };
        Ok(pj_type)
    }

    pub(crate) fn to_native(self) -> proj_sys::PJ_TYPE {
        use PjType::*;
        match self {
            Unknown => proj_sys::PJ_TYPE_PJ_TYPE_UNKNOWN,
            Ellipsoid => proj_sys::PJ_TYPE_PJ_TYPE_ELLIPSOID,
            PrimeMeridian => proj_sys::PJ_TYPE_PJ_TYPE_PRIME_MERIDIAN,
            GeodeticReferenceFrame => proj_sys::PJ_TYPE_PJ_TYPE_GEODETIC_REFERENCE_FRAME,
            DynamicGeodeticReferenceFrame => {
                proj_sys::PJ_TYPE_PJ_TYPE_DYNAMIC_GEODETIC_REFERENCE_FRAME
            }
            VerticalReferenceFrame => proj_sys::PJ_TYPE_PJ_TYPE_VERTICAL_REFERENCE_FRAME,
            DynamicVerticalReferenceFrame => {
                proj_sys::PJ_TYPE_PJ_TYPE_DYNAMIC_VERTICAL_REFERENCE_FRAME
            }
            DatumEnsemble => proj_sys::PJ_TYPE_PJ_TYPE_DATUM_ENSEMBLE,
            Crs => proj_sys::PJ_TYPE_PJ_TYPE_CRS,
            GeodeticCrs => proj_sys::PJ_TYPE_PJ_TYPE_GEODETIC_CRS,
            GeocentricCrs => proj_sys::PJ_TYPE_PJ_TYPE_GEOCENTRIC_CRS,
            GeographicCrs => proj_sys::PJ_TYPE_PJ_TYPE_GEOGRAPHIC_CRS,
            Geographic2dCrs => proj_sys::PJ_TYPE_PJ_TYPE_GEOGRAPHIC_2D_CRS,
            Geographic3dCrs => proj_sys::PJ_TYPE_PJ_TYPE_GEOGRAPHIC_3D_CRS,
            VerticalCrs => proj_sys::PJ_TYPE_PJ_TYPE_VERTICAL_CRS,
            ProjectedCrs => proj_sys::PJ_TYPE_PJ_TYPE_PROJECTED_CRS,
            CompoundCrs => proj_sys::PJ_TYPE_PJ_TYPE_COMPOUND_CRS,
            TemporalCrs => proj_sys::PJ_TYPE_PJ_TYPE_TEMPORAL_CRS,
            EngineeringCrs => proj_sys::PJ_TYPE_PJ_TYPE_ENGINEERING_CRS,
            BoundCrs => proj_sys::PJ_TYPE_PJ_TYPE_BOUND_CRS,
            OtherCrs => proj_sys::PJ_TYPE_PJ_TYPE_OTHER_CRS,
            Conversion => proj_sys::PJ_TYPE_PJ_TYPE_CONVERSION,
            Transformation => proj_sys::PJ_TYPE_PJ_TYPE_TRANSFORMATION,
            ConcatenatedOperation => proj_sys::PJ_TYPE_PJ_TYPE_CONCATENATED_OPERATION,
            OtherCoordinateOperation => proj_sys::PJ_TYPE_PJ_TYPE_OTHER_COORDINATE_OPERATION,
            TemporalDatum => proj_sys::PJ_TYPE_PJ_TYPE_TEMPORAL_DATUM,
            EngineeringDatum => proj_sys::PJ_TYPE_PJ_TYPE_ENGINEERING_DATUM,
            ParametricDatum => proj_sys::PJ_TYPE_PJ_TYPE_PARAMETRIC_DATUM,
            DerivedProjectedCrs => proj_sys::PJ_TYPE_PJ_TYPE_DERIVED_PROJECTED_CRS,
            CoordinateMetadata => proj_sys::PJ_TYPE_PJ_TYPE_COORDINATE_METADATA,
        }
    }

    pub fn is_crs(self) -> bool {
        use PjType::*;
        matches!(
            self,
            Crs | GeodeticCrs
                | GeocentricCrs
                | GeographicCrs
                | Geographic2dCrs
                | Geographic3dCrs
                | VerticalCrs
                | ProjectedCrs
                | CompoundCrs
                | TemporalCrs
                | EngineeringCrs
                | BoundCrs
                | OtherCrs
                | DerivedProjectedCrs
        )
    }

    /// The upper-case name PROJ uses for this type, without the `PJ_TYPE_` prefix.
    pub fn as_str(self) -> &'static str {
        use PjType::*;
        match self {
            Unknown => "UNKNOWN",
            Ellipsoid => "ELLIPSOID",
            PrimeMeridian => "PRIME_MERIDIAN",
            GeodeticReferenceFrame => "GEODETIC_REFERENCE_FRAME",
            DynamicGeodeticReferenceFrame => "DYNAMIC_GEODETIC_REFERENCE_FRAME",
            VerticalReferenceFrame => "VERTICAL_REFERENCE_FRAME",
            DynamicVerticalReferenceFrame => "DYNAMIC_VERTICAL_REFERENCE_FRAME",
            DatumEnsemble => "DATUM_ENSEMBLE",
            Crs => "CRS",
            GeodeticCrs => "GEODETIC_CRS",
            GeocentricCrs => "GEOCENTRIC_CRS",
            GeographicCrs => "GEOGRAPHIC_CRS",
            Geographic2dCrs => "GEOGRAPHIC_2D_CRS",
            Geographic3dCrs => "GEOGRAPHIC_3D_CRS",
            VerticalCrs => "VERTICAL_CRS",
            ProjectedCrs => "PROJECTED_CRS",
            CompoundCrs => "COMPOUND_CRS",
            TemporalCrs => "TEMPORAL_CRS",
            EngineeringCrs => "ENGINEERING_CRS",
            BoundCrs => "BOUND_CRS",
            OtherCrs => "OTHER_CRS",
            Conversion => "CONVERSION",
            Transformation => "TRANSFORMATION",
            ConcatenatedOperation => "CONCATENATED_OPERATION",
            OtherCoordinateOperation => "OTHER_COORDINATE_OPERATION",
            TemporalDatum => "TEMPORAL_DATUM",
            EngineeringDatum => "ENGINEERING_DATUM",
            ParametricDatum => "PARAMETRIC_DATUM",
            DerivedProjectedCrs => "DERIVED_PROJECTED_CRS",
            CoordinateMetadata => "COORDINATE_METADATA",
        }
    }
}

impl fmt::Display for PjType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// WKT dialects accepted by [`Pj::as_wkt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WktType {
    Wkt2_2015,
    Wkt2_2015Simplified,
    Wkt2_2019,
    Wkt2_2019Simplified,
    Wkt1Gdal,
    Wkt1Esri,
}

impl WktType {
    /// Older name of [`WktType::Wkt2_2019`].
    pub const WKT2_2018: WktType = WktType::Wkt2_2019;
    /// Older name of [`WktType::Wkt2_2019Simplified`].
    pub const WKT2_2018_SIMPLIFIED: WktType = WktType::Wkt2_2019Simplified;

    pub(crate) fn to_native(self) -> proj_sys::PJ_WKT_TYPE {
        match self {
            WktType::Wkt2_2015 => proj_sys::PJ_WKT_TYPE_PJ_WKT2_2015,
            WktType::Wkt2_2015Simplified => proj_sys::PJ_WKT_TYPE_PJ_WKT2_2015_SIMPLIFIED,
            WktType::Wkt2_2019 => proj_sys::PJ_WKT_TYPE_PJ_WKT2_2019,
            WktType::Wkt2_2019Simplified => proj_sys::PJ_WKT_TYPE_PJ_WKT2_2019_SIMPLIFIED,
            WktType::Wkt1Gdal => proj_sys::PJ_WKT_TYPE_PJ_WKT1_GDAL,
            WktType::Wkt1Esri => proj_sys::PJ_WKT_TYPE_PJ_WKT1_ESRI,
        }
    }
}

impl fmt::Display for WktType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WktType::Wkt2_2015 => "PJ_WKT2_2015",
            WktType::Wkt2_2015Simplified => "PJ_WKT2_2015_SIMPLIFIED",
            WktType::Wkt2_2019 => "PJ_WKT2_2019",
            WktType::Wkt2_2019Simplified => "PJ_WKT2_2019_SIMPLIFIED",
            WktType::Wkt1Gdal => "PJ_WKT1_GDAL",
            WktType::Wkt1Esri => "PJ_WKT1_ESRI",
        })
    }
}

/// A database candidate returned by [`Pj::identify`].
///
/// For the meaning of `confidence` see
/// <https://proj.org/en/stable/development/reference/functions.html#c.proj_identify>;
/// 100 is an exact match. Order between equal confidences is not meaningful.
#[derive(Debug)]
pub struct IdentifyMatch {
    pub pj: Pj,
    pub confidence: i32,
}

/// Owned snapshot of an [`IdentifyMatch`].
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifyMatchInfo {
    pub srid: Srid,
    pub description: String,
    pub confidence: i32,
}

/// Everything [`Pj::full_info`] gathers about an object in one value.
#[derive(Debug, Clone, PartialEq)]
pub struct FullPjInfo {
    pub info: PjInfo,
    pub is_crs: bool,
    pub pj_type: PjType,
    pub area_of_use: Option<AreaOfUse>,
    /// Database matches; empty unless `is_crs`.
    pub crs_matches: Vec<IdentifyMatchInfo>,
}

/// Version of the linked `libproj`, see [`crate::version`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: i32,
    pub minor: i32,
    pub patch: i32,
    /// Release string, e.g. `Rel. 9.4.0, March 1st, 2024`.
    pub release: String,
}
