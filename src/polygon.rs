use crate::*;

/// A polygon boundary.
///
/// The boundary is kept as supplied, which is usually a closed ring where the last point
/// repeats the first.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Polygon3(Vec<Point3>);

impl Polygon3 {
    pub fn new<I>(points: I) -> Result<Self, &'static str>
    where
        I: IntoIterator<Item = Point3>,
    {
        let p = Polygon3(points.into_iter().collect::<Vec<_>>());
        if p.ring().len() < 3 {
            Err("polygon requires 3 or more points to be valid")
        } else {
            Ok(p)
        }
    }

    /// The boundary as supplied, including any closing point.
    pub fn boundary(&self) -> &[Point3] {
        &self.0
    }

    /// The boundary vertices with the closing duplicate dropped.
    ///
    /// # Example
    /// ```rust
    /// # use hougeo::*;
    /// let p = Polygon3::new([
    ///     [0.0, 0.0, 0.0],
    ///     [2.0, 0.0, 0.0],
    ///     [2.0, 2.0, 0.0],
    ///     [0.0, 0.0, 0.0],
    /// ]).unwrap();
    ///
    /// assert_eq!(p.ring().len(), 3);
    /// ```
    pub fn ring(&self) -> &[Point3] {
        match self.0.as_slice() {
            [first, .., last] if same_point(*first, *last) => &self.0[..self.0.len() - 1],
            ps => ps,
        }
    }

    pub fn len(&self) -> usize {
        self.ring().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Aabb for Polygon3 {
    type Space = Point3;
    fn aabb(&self) -> Extents3 {
        self.0.iter().copied().collect()
    }
}
