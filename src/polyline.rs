use super::*;

/// An open chain of vertices.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Polyline3(Vec<Point3>);

impl Polyline3 {
    pub fn new<I>(points: I) -> Result<Self, &'static str>
    where
        I: IntoIterator<Item = Point3>,
    {
        let points = points.into_iter().collect::<Vec<_>>();
        if points.len() < 2 {
            Err("polyline requires 2 or more points to be valid")
        } else {
            Ok(Polyline3(points))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pts(&self) -> &[Point3] {
        &self.0
    }

    /// The chain is closed if the last point returns to the first.
    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(&a), Some(&b)) => self.len() > 2 && same_point(a, b),
            _ => false,
        }
    }
}

impl Aabb for Polyline3 {
    type Space = Point3;
    fn aabb(&self) -> Extents3 {
        self.0.iter().copied().collect()
    }
}

impl IntoIterator for Polyline3 {
    type Item = Point3;
    type IntoIter = std::vec::IntoIter<Self::Item>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
