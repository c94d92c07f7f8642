use crate::coord::{Bounds, Coord};
use crate::errno::{Errno, ProjError};
use crate::pj::Pj;
use libc::c_int;
use std::mem;
use std::ptr;

/// Direction of a transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Inverse,
    /// Leave coordinates untouched.
    Identity,
}

impl From<Direction> for proj_sys::PJ_DIRECTION {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Forward => proj_sys::PJ_DIRECTION_PJ_FWD,
            Direction::Inverse => proj_sys::PJ_DIRECTION_PJ_INV,
            Direction::Identity => proj_sys::PJ_DIRECTION_PJ_IDENT,
        }
    }
}

const F64_SIZE: usize = mem::size_of::<f64>();

impl Pj {
    /// Transform a single coordinate.
    ///
    /// # Examples
    ///
    /// ```
    /// use approx::assert_relative_eq;
    /// use proj_ctx::{Context, Coord, Direction};
    ///
    /// let pj = Context::new().new_crs_to_crs("EPSG:4326", "EPSG:3857", None).unwrap();
    /// let paris = pj.trans(Direction::Forward, Coord::new(48.856613, 2.352222, 78.0, 0.0)).unwrap();
    /// assert_relative_eq!(paris.x(), 261848.155, epsilon = 1e-3);
    /// ```
    pub fn trans(&self, direction: Direction, coord: Coord) -> Result<Coord, ProjError> {
        self.with_errno_scope(|native, raw, scope| {
            let result = unsafe { proj_sys::proj_trans(raw, direction.into(), coord.to_pj()) };
            scope.check(native, ProjError::transform)?;
            Ok(Coord::from_pj(result))
        })
    }

    /// Transform `coords` in place. Coordinates PROJ cannot transform are set to
    /// infinity and reported as an error once the whole slice was processed.
    pub fn trans_array(&self, direction: Direction, coords: &mut [Coord]) -> Result<(), ProjError> {
        if coords.is_empty() {
            return Ok(());
        }
        self.with_errno_scope(|native, raw, scope| {
            // `Coord` has the layout of `PJ_COORD`.
            let code = unsafe {
                proj_sys::proj_trans_array(
                    raw,
                    direction.into(),
                    coords.len(),
                    coords.as_mut_ptr().cast::<proj_sys::PJ_COORD>(),
                )
            };
            if code != 0 {
                return Err(ProjError::transform(Errno(code), native));
            }
            scope.check(native, ProjError::transform)
        })
    }

    /// Transform a bounding box, sampling `densify_points` extra points along each edge
    /// (21 is the value PROJ recommends) and returning the box enclosing all of them.
    pub fn trans_bounds(
        &self,
        direction: Direction,
        bounds: Bounds,
        densify_points: usize,
    ) -> Result<Bounds, ProjError> {
        let densify_points = c_int::try_from(densify_points).map_err(|_| {
            ProjError::InvalidArgument(format!("too many densify points: {densify_points}"))
        })?;
        self.with_errno_scope(|native, raw, scope| {
            let mut out = Bounds::default();
            let success = unsafe {
                proj_sys::proj_trans_bounds(
                    native.as_ptr(),
                    raw,
                    direction.into(),
                    bounds.xmin,
                    bounds.ymin,
                    bounds.xmax,
                    bounds.ymax,
                    &mut out.xmin,
                    &mut out.ymin,
                    &mut out.xmax,
                    &mut out.ymax,
                    densify_points,
                )
            };
            if success == 0 {
                return Err(ProjError::transform(scope.errno(), native));
            }
            Ok(out)
        })
    }

    /// Transform coordinates stored interleaved in one buffer, `stride` values per
    /// point, without copying them.
    ///
    /// x and y are the first two values of each point; `z_index` and `m_index` locate
    /// the optional third and fourth components within a point. `coords.len()` must
    /// be a multiple of `stride`.
    ///
    /// ```
    /// use proj_ctx::{Context, Direction};
    ///
    /// let pj = Context::new().new_crs_to_crs("EPSG:4326", "EPSG:3857", None).unwrap();
    /// // lat, lon, height, id
    /// let mut points = [48.856613, 2.352222, 78.0, 1.0, 40.712778, -74.006111, 10.0, 2.0];
    /// pj.trans_flat_coords(Direction::Forward, &mut points, 4, Some(2), None).unwrap();
    /// assert_eq!((points[3], points[7]), (1.0, 2.0));
    /// ```
    pub fn trans_flat_coords(
        &self,
        direction: Direction,
        coords: &mut [f64],
        stride: usize,
        z_index: Option<usize>,
        m_index: Option<usize>,
    ) -> Result<(), ProjError> {
        if stride < 2 {
            return Err(ProjError::InvalidLayout(format!(
                "stride {stride} cannot hold x and y"
            )));
        }
        for (name, index) in [("z", z_index), ("m", m_index)] {
            if let Some(index) = index {
                if !(2..stride).contains(&index) {
                    return Err(ProjError::InvalidLayout(format!(
                        "{name} index {index} outside 2..{stride}"
                    )));
                }
            }
        }
        if z_index.is_some() && z_index == m_index {
            return Err(ProjError::InvalidLayout(
                "z and m share the same index".to_string(),
            ));
        }
        if coords.len() % stride != 0 {
            return Err(ProjError::InvalidLayout(format!(
                "{} values do not split into points of {stride}",
                coords.len()
            )));
        }
        if coords.is_empty() {
            return Ok(());
        }

        let count = coords.len() / stride;
        let step = F64_SIZE * stride;
        let base = coords.as_mut_ptr();
        let axis = |index: Option<usize>| match index {
            // Safety: `index < stride <= coords.len()`.
            Some(index) => (unsafe { base.add(index) }, step, count),
            None => (ptr::null_mut(), 0, 0),
        };
        let (x, y, z, m) = (axis(Some(0)), axis(Some(1)), axis(z_index), axis(m_index));
        // Safety: each axis reads `count` values `stride` apart, starting within the
        // first point, so the last one read is inside the last point.
        unsafe {
            self.trans_generic(
                direction, x.0, x.1, x.2, y.0, y.1, y.2, z.0, z.1, z.2, m.0, m.1, m.2,
            )
        }
    }

    /// Transform a point of 2 to 4 values in place. Missing components are read as
    /// zero and not written back. An empty slice is left alone.
    pub fn trans_f64_slice(&self, direction: Direction, values: &mut [f64]) -> Result<(), ProjError> {
        if values.is_empty() {
            return Ok(());
        }
        check_point_len(values)?;
        let result = self.trans(direction, Coord::from_prefix(values))?;
        let len = values.len();
        values.copy_from_slice(&result.as_array()[..len]);
        Ok(())
    }

    /// Transform points of 2 to 4 values each in place, in one native call. Every point
    /// keeps its length.
    pub fn trans_f64_slices<S: AsMut<[f64]>>(
        &self,
        direction: Direction,
        points: &mut [S],
    ) -> Result<(), ProjError> {
        let mut coords = Vec::with_capacity(points.len());
        for (index, point) in points.iter_mut().enumerate() {
            let values = point.as_mut();
            check_point_len(values).map_err(|err| err.context(format!("slice {index}")))?;
            coords.push(Coord::from_prefix(values));
        }
        self.trans_array(direction, &mut coords)?;
        for (point, coord) in points.iter_mut().zip(&coords) {
            let values = point.as_mut();
            let len = values.len();
            values.copy_from_slice(&coord.as_array()[..len]);
        }
        Ok(())
    }

    /// Transform coordinates held in separate arrays, one per axis. `y`, `z` and `m`
    /// must be as long as `x`.
    pub fn trans_columns(
        &self,
        direction: Direction,
        x: &mut [f64],
        y: &mut [f64],
        z: Option<&mut [f64]>,
        m: Option<&mut [f64]>,
    ) -> Result<(), ProjError> {
        let count = x.len();
        let column = |name: &str, values: Option<&mut [f64]>| match values {
            Some(values) if values.len() != count => Err(ProjError::InvalidLayout(format!(
                "{name} has {} values, x has {count}",
                values.len()
            ))),
            Some(values) => Ok((values.as_mut_ptr(), F64_SIZE, count)),
            None => Ok((ptr::null_mut(), 0, 0)),
        };
        let y = column("y", Some(y))?;
        let z = column("z", z)?;
        let m = column("m", m)?;
        if count == 0 {
            return Ok(());
        }
        // Safety: every column holds `count` contiguous values.
        unsafe {
            self.trans_generic(
                direction,
                x.as_mut_ptr(),
                F64_SIZE,
                count,
                y.0,
                y.1,
                y.2,
                z.0,
                z.1,
                z.2,
                m.0,
                m.1,
                m.2,
            )
        }
    }

    /// The strided primitive behind the other batch transformations, see
    /// `proj_trans_generic`.
    ///
    /// Each axis is a pointer, a stride in bytes and a count. A null pointer or a zero
    /// count leaves that axis out. Succeeds only if PROJ reports having transformed the
    /// largest of the counts.
    ///
    /// # Safety
    ///
    /// For every axis with a non-zero count, `count` values spaced `stride` bytes
    /// apart must be valid for reads and writes, and no other reference may access them
    /// for the duration of the call.
    #[allow(clippy::too_many_arguments)]
    pub unsafe fn trans_generic(
        &self,
        direction: Direction,
        x: *mut f64,
        sx: usize,
        nx: usize,
        y: *mut f64,
        sy: usize,
        ny: usize,
        z: *mut f64,
        sz: usize,
        nz: usize,
        m: *mut f64,
        sm: usize,
        nm: usize,
    ) -> Result<(), ProjError> {
        let expected = nx.max(ny).max(nz).max(nm);
        self.with_errno_scope(|native, raw, scope| {
            let transformed = unsafe {
                proj_sys::proj_trans_generic(
                    raw,
                    direction.into(),
                    x,
                    sx,
                    nx,
                    y,
                    sy,
                    ny,
                    z,
                    sz,
                    nz,
                    m,
                    sm,
                    nm,
                )
            };
            if transformed != expected {
                return Err(ProjError::transform(scope.errno(), native).context(format!(
                    "transformed {transformed} of {expected} points"
                )));
            }
            scope.check(native, ProjError::transform)
        })
    }

    pub fn forward(&self, coord: Coord) -> Result<Coord, ProjError> {
        self.trans(Direction::Forward, coord)
    }

    pub fn inverse(&self, coord: Coord) -> Result<Coord, ProjError> {
        self.trans(Direction::Inverse, coord)
    }

    pub fn forward_array(&self, coords: &mut [Coord]) -> Result<(), ProjError> {
        self.trans_array(Direction::Forward, coords)
    }

    pub fn inverse_array(&self, coords: &mut [Coord]) -> Result<(), ProjError> {
        self.trans_array(Direction::Inverse, coords)
    }

    pub fn forward_bounds(&self, bounds: Bounds, densify_points: usize) -> Result<Bounds, ProjError> {
        self.trans_bounds(Direction::Forward, bounds, densify_points)
    }

    pub fn inverse_bounds(&self, bounds: Bounds, densify_points: usize) -> Result<Bounds, ProjError> {
        self.trans_bounds(Direction::Inverse, bounds, densify_points)
    }

    pub fn forward_flat_coords(
        &self,
        coords: &mut [f64],
        stride: usize,
        z_index: Option<usize>,
        m_index: Option<usize>,
    ) -> Result<(), ProjError> {
        self.trans_flat_coords(Direction::Forward, coords, stride, z_index, m_index)
    }

    pub fn inverse_flat_coords(
        &self,
        coords: &mut [f64],
        stride: usize,
        z_index: Option<usize>,
        m_index: Option<usize>,
    ) -> Result<(), ProjError> {
        self.trans_flat_coords(Direction::Inverse, coords, stride, z_index, m_index)
    }

    pub fn forward_f64_slice(&self, values: &mut [f64]) -> Result<(), ProjError> {
        self.trans_f64_slice(Direction::Forward, values)
    }

    pub fn inverse_f64_slice(&self, values: &mut [f64]) -> Result<(), ProjError> {
        self.trans_f64_slice(Direction::Inverse, values)
    }

    pub fn forward_f64_slices<S: AsMut<[f64]>>(&self, points: &mut [S]) -> Result<(), ProjError> {
        self.trans_f64_slices(Direction::Forward, points)
    }

    pub fn inverse_f64_slices<S: AsMut<[f64]>>(&self, points: &mut [S]) -> Result<(), ProjError> {
        self.trans_f64_slices(Direction::Inverse, points)
    }
}

fn check_point_len(values: &[f64]) -> Result<(), ProjError> {
    if (2..=4).contains(&values.len()) {
        Ok(())
    } else {
        Err(ProjError::InvalidLayout(format!(
            "a point needs 2 to 4 values, got {}",
            values.len()
        )))
    }
}
