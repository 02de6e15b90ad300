use std::ops;

pub trait Point: Copy + Sized + IntoIterator<Item = f64> {
    /// Set all the values to this value.
    fn all(v: f64) -> Self;

    /// Set all values to zero.
    fn zero() -> Self {
        Self::all(0.)
    }

    /// Scale point by multiplying all dimensions by `scalar`.
    fn scale(self, scalar: f64) -> Self;

    /// Return the minimum of each dimension.
    fn min_all(self, b: Self) -> Self {
        xfm(self, b, f64::min)
    }

    /// Return the maximum of each dimension.
    fn max_all(self, b: Self) -> Self {
        xfm(self, b, f64::max)
    }

    /// Test that every dimension is a finite number.
    fn is_finite(self) -> bool {
        self.into_iter().all(f64::is_finite)
    }

    /// Perform a transformation on each pair of dimensions.
    fn xfm<F: Fn(f64, f64) -> f64>(self, b: Self, f: F) -> Self;
}

pub trait Add<Rhs = Self> {
    fn add(self, rhs: Rhs) -> Self;
    fn sub(self, rhs: Rhs) -> Self
    where
        Self: Sized + Copy,
        Rhs: Point,
    {
        self.add(rhs.scale(-1.0))
    }
}

/// 2D Point (X,Y).
pub type Point2 = [f64; 2];

/// 3D Point (X,Y,Z).
pub type Point3 = [f64; 3];

impl Add for Point2 {
    fn add(self, rhs: Self) -> Self {
        xfm(self, rhs, ops::Add::add)
    }

    fn sub(self, rhs: Self) -> Self {
        xfm(self, rhs, ops::Sub::sub)
    }
}
impl Point for Point2 {
    fn all(v: f64) -> Self {
        [v; 2]
    }
    fn scale(self, scalar: f64) -> Self {
        self.map(|f| f * scalar)
    }
    fn xfm<F: Fn(f64, f64) -> f64>(self, b: Self, f: F) -> Self {
        let [ax, ay] = self;
        let [bx, by] = b;
        [f(ax, bx), f(ay, by)]
    }
}

impl Add for Point3 {
    fn add(self, rhs: Self) -> Self {
        Self::xfm(self, rhs, ops::Add::add)
    }

    fn sub(self, rhs: Self) -> Self {
        Self::xfm(self, rhs, ops::Sub::sub)
    }
}
impl Point for Point3 {
    fn all(v: f64) -> Self {
        [v; 3]
    }
    fn scale(self, scalar: f64) -> Self {
        self.map(|f| f * scalar)
    }
    fn xfm<F: Fn(f64, f64) -> f64>(self, b: Self, f: F) -> Self {
        let [ax, ay, az] = self;
        let [bx, by, bz] = b;
        [f(ax, bx), f(ay, by), f(az, bz)]
    }
}

impl Add<Point2> for Point3 {
    fn add(self, rhs: Point2) -> Self {
        let rhs: Point3 = rhs.with_z(0.);
        self.add(rhs)
    }
}

pub trait ToPoint2 {
    fn to_p2(self) -> Point2;
}

impl ToPoint2 for Point2 {
    fn to_p2(self) -> Point2 {
        self
    }
}
impl ToPoint2 for &Point2 {
    fn to_p2(self) -> Point2 {
        *self
    }
}
impl ToPoint2 for Point3 {
    fn to_p2(self) -> Point2 {
        let [x, y, _] = self;
        [x, y]
    }
}
impl ToPoint2 for &Point3 {
    fn to_p2(self) -> Point2 {
        (*self).to_p2()
    }
}

pub trait WithZ: ToPoint2 + Sized {
    fn with_z(self, z: f64) -> Point3 {
        let [x, y] = self.to_p2();
        [x, y, z]
    }
}

impl WithZ for Point2 {}
impl WithZ for Point3 {}

/// Weighted average of two points in plan.
///
/// `fraction` is the weight given to `a` and is clamped into `[0, 1]`; `b` receives the
/// remainder. A fraction of `0.5` gives the midpoint.
pub fn lerp(a: impl ToPoint2, b: impl ToPoint2, fraction: f64) -> Point2 {
    let w = fraction.clamp(0.0, 1.0);
    a.to_p2().scale(w).add(b.to_p2().scale(1.0 - w))
}

/// Same point, with tolerance.
pub fn same_point(a: Point3, b: Point3) -> bool {
    const T: f64 = 1e-7;
    a.xfm(b, |a, b| (a - b).abs()).into_iter().all(|f| f < T)
}

/// Helper function which effectively transforms to [`Point::xfm`].
#[inline(always)]
pub fn xfm<P: Point, F: Fn(f64, f64) -> f64>(a: P, b: P, f: F) -> P {
    P::xfm(a, b, f)
}
