use std::ops::{Index, IndexMut};

/// A four-component coordinate.
///
/// The meaning of the axes (longitude/latitude/height/time, easting/northing/height/
/// measure, ...) and their order are defined by the CRS of the object it is passed to.
/// EPSG:4326, for instance, is latitude first.
#[repr(transparent)]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Coord(pub [f64; 4]);

// `trans_array` hands `&mut [Coord]` to PROJ as a `PJ_COORD` array.
const _: () = assert!(std::mem::size_of::<Coord>() == std::mem::size_of::<proj_sys::PJ_COORD>());
const _: () = assert!(std::mem::align_of::<Coord>() == std::mem::align_of::<proj_sys::PJ_COORD>());

impl Coord {
    pub const fn new(x: f64, y: f64, z: f64, m: f64) -> Self {
        Coord([x, y, z, m])
    }

    pub const fn x(&self) -> f64 {
        self.0[0]
    }

    pub const fn y(&self) -> f64 {
        self.0[1]
    }

    pub const fn z(&self) -> f64 {
        self.0[2]
    }

    /// Fourth component: time for PROJ's own operations, a measure for most callers.
    pub const fn m(&self) -> f64 {
        self.0[3]
    }

    pub fn set_x(&mut self, x: f64) {
        self.0[0] = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.0[1] = y;
    }

    pub fn set_z(&mut self, z: f64) {
        self.0[2] = z;
    }

    pub fn set_m(&mut self, m: f64) {
        self.0[3] = m;
    }

    /// Swap the first two axes, e.g. latitude/longitude to longitude/latitude.
    pub const fn swapped(self) -> Self {
        Coord([self.0[1], self.0[0], self.0[2], self.0[3]])
    }

    /// Convert the first two components from degrees to radians. `z` and `m` are kept.
    pub fn to_radians(self) -> Self {
        Coord([self.0[0].to_radians(), self.0[1].to_radians(), self.0[2], self.0[3]])
    }

    /// Convert the first two components from radians to degrees. `z` and `m` are kept.
    pub fn to_degrees(self) -> Self {
        Coord([self.0[0].to_degrees(), self.0[1].to_degrees(), self.0[2], self.0[3]])
    }

    pub const fn as_array(&self) -> &[f64; 4] {
        &self.0
    }

    pub(crate) fn to_pj(self) -> proj_sys::PJ_COORD {
        proj_sys::PJ_COORD { v: self.0 }
    }

    pub(crate) fn from_pj(coord: proj_sys::PJ_COORD) -> Self {
        // Safety: every member of the union is plain `f64`s; `v` covers all of them.
        Coord(unsafe { coord.v })
    }

    /// Copy up to four leading values of `values` into a coordinate; missing
    /// components are zero.
    pub(crate) fn from_prefix(values: &[f64]) -> Self {
        let mut coord = Coord::default();
        let len = values.len().min(4);
        coord.0[..len].copy_from_slice(&values[..len]);
        coord
    }
}

impl From<[f64; 4]> for Coord {
    fn from(value: [f64; 4]) -> Self {
        Coord(value)
    }
}

impl From<Coord> for [f64; 4] {
    fn from(value: Coord) -> Self {
        value.0
    }
}

impl From<(f64, f64)> for Coord {
    fn from((x, y): (f64, f64)) -> Self {
        Coord([x, y, 0.0, 0.0])
    }
}

impl From<(f64, f64, f64)> for Coord {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Coord([x, y, z, 0.0])
    }
}

impl Index<usize> for Coord {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl IndexMut<usize> for Coord {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.0[index]
    }
}

/// An axis-aligned bounding box in the units and axis order of its CRS.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Bounds {
    pub const fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Bounds {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn contains(&self, coord: &Coord) -> bool {
        (self.xmin..=self.xmax).contains(&coord.x()) && (self.ymin..=self.ymax).contains(&coord.y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_accessors() {
        let mut coord = Coord::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!((coord.x(), coord.y(), coord.z(), coord.m()), (1.0, 2.0, 3.0, 4.0));
        coord.set_m(5.0);
        coord[2] = 6.0;
        assert_eq!(coord, Coord::from([1.0, 2.0, 6.0, 5.0]));
        assert_eq!(coord.swapped(), Coord::new(2.0, 1.0, 6.0, 5.0));
    }

    #[test]
    fn test_degree_conversion_keeps_z_and_m() {
        let coord = Coord::new(180.0, 90.0, 540.0, 1.0).to_radians();
        assert_relative_eq!(coord.x(), PI);
        assert_relative_eq!(coord.y(), FRAC_PI_2);
        assert_eq!((coord.z(), coord.m()), (540.0, 1.0));
        let back = coord.to_degrees();
        assert_relative_eq!(back.x(), 180.0);
        assert_relative_eq!(back.y(), 90.0);
    }

    #[test]
    fn test_from_prefix() {
        assert_eq!(Coord::from_prefix(&[]), Coord::default());
        assert_eq!(Coord::from_prefix(&[1.0, 2.0]), Coord::new(1.0, 2.0, 0.0, 0.0));
        assert_eq!(Coord::from_prefix(&[1.0, 2.0, 3.0]), Coord::from((1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_pj_coord_conversion() {
        let coord = Coord::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(Coord::from_pj(coord.to_pj()), coord);
    }

    #[test]
    fn test_bounds() {
        let bounds = Bounds::new(-10.0, -5.0, 10.0, 5.0);
        assert_eq!(bounds.width(), 20.0);
        assert_eq!(bounds.height(), 10.0);
        assert!(bounds.contains(&Coord::from((0.0, 5.0))));
        assert!(!bounds.contains(&Coord::from((0.0, 5.5))));
    }
}
