use crate::*;

pub type Extents3 = Extents<Point3>;

/// An axis aligned bounding volume.
///
/// Both corners are stored as given, so `min` and `max` are exact for any finite input.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Extents<P> {
    min: P,
    max: P,
}

impl<P> Extents<P>
where
    P: Copy + Point,
{
    pub fn zero() -> Self {
        Self {
            min: P::zero(),
            max: P::zero(),
        }
    }

    /// Build extents from two corners.
    ///
    /// The corners do not have to be ordered, each dimension takes the smaller value as the
    /// minimum.
    pub fn from_min_max(min: P, max: P) -> Self {
        Self {
            min: min.min_all(max),
            max: min.max_all(max),
        }
    }

    pub fn min(&self) -> P {
        self.min
    }

    pub fn max(&self) -> P {
        self.max
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min_all(other.min),
            max: self.max.max_all(other.max),
        }
    }
}

impl Extents3 {
    /// The 6 values `[xmin, ymin, zmin, xmax, ymax, zmax]`.
    pub fn flatten(&self) -> [f64; 6] {
        let [a, b, c] = self.min();
        let [d, e, f] = self.max();
        [a, b, c, d, e, f]
    }
}

impl FromIterator<Point3> for Extents3 {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Point3>,
    {
        let mut iter = iter.into_iter();
        let Some(init) = iter.next() else { return Self::zero(); };

        let (min, max) = iter.fold((init, init), |(min, max), p| {
            (min.min_all(p), max.max_all(p))
        });

        Self::from_min_max(min, max)
    }
}

/// Build the union of an iterator of [`Extents`].
/// If the iterator is empty, a zero-sized extents about the origin is returned.
impl<P> FromIterator<Self> for Extents<P>
where
    P: Copy + Point,
{
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Self>,
    {
        iter.into_iter()
            .reduce(Extents::union)
            .unwrap_or_else(Extents::zero)
    }
}

pub trait Aabb {
    type Space;

    fn aabb(&self) -> Extents<Self::Space>;
}
