//! Centroid offset and axis conversion of batch geometry.
//!
//! Source geometry is Z-up with the horizontal plane on X/Y. Documents are Y-up. The
//! conversion is a right handed rotation about X: `(x, y, z) -> (x, z, -y)`, applied to
//! points and bounds alike.
use crate::*;
use rayon::prelude::*;

/// The shared origin of one batch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame {
    /// Plan centroid of the bounding volume, in source coordinates.
    pub centroid: Point2,
    /// Translation applied to every source point before axis conversion.
    pub offset: Point3,
    /// The bounding volume after offset and axis conversion.
    pub bounds: Extents3,
}

/// Convert a Z-up point to Y-up.
pub fn zup_to_yup(p: Point3) -> Point3 {
    let [x, y, z] = p;
    [x, z, -y]
}

/// Build the batch [`Frame`] from the two corners of the bounding volume.
///
/// # Example
/// ```rust
/// # use hougeo::*;
/// let f = normalize([0.0, 0.0, 0.0], [4.0, 4.0, 0.0]);
/// assert_eq!(f.centroid, [2.0, 2.0]);
/// assert_eq!(f.offset, [-2.0, -2.0, 0.0]);
/// assert_eq!(f.apply([4.0, 0.0, 0.0]), [2.0, 0.0, 2.0]);
/// ```
pub fn normalize(min: Point3, max: Point3) -> Frame {
    let [cx, cy] = lerp(min, max, 0.5);
    let offset = [-cx, -cy, 0.0];

    let xfm = |p: Point3| zup_to_yup(p.add(offset));
    let bounds = Extents3::from_iter([xfm(min), xfm(max)]);

    Frame {
        centroid: [cx, cy],
        offset,
        bounds,
    }
}

impl Frame {
    /// Frame from a bounding volume.
    pub fn from_extents(e: &Extents3) -> Self {
        normalize(e.min(), e.max())
    }

    /// Offset then axis convert a source point.
    pub fn apply(&self, p: Point3) -> Point3 {
        zup_to_yup(p.add(self.offset))
    }

    /// Transform a list of source points, preserving order.
    pub fn apply_all(&self, ps: &[Point3]) -> Vec<Point3> {
        ps.par_iter().map(|&p| self.apply(p)).collect()
    }

    /// The centroid in target coordinates, as `[x, y, z]` with y vertical.
    ///
    /// The vertical component is never offset, so it is zero.
    pub fn centroid_yup(&self) -> Point3 {
        let [x, y] = self.centroid;
        [x, 0.0, y]
    }
}
