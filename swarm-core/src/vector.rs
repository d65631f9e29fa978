use core::ops::{Add, AddAssign, Div, Mul, Sub};

#[inline]
pub(crate) fn sqrt(value: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        value.sqrt()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sqrtf(value)
    }
}

#[inline]
pub(crate) fn atan2(y: f32, x: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        y.atan2(x)
    }
    #[cfg(not(feature = "std"))]
    {
        libm::atan2f(y, x)
    }
}

/// A 2D vector used for positions, velocities and steering forces.
///
/// Every operation returns a fresh value. Degenerate inputs (zero vectors,
/// division by zero) resolve to the zero vector instead of NaN.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self::ZERO
    }

    pub fn magnitude(&self) -> f32 {
        sqrt(self.x * self.x + self.y * self.y)
    }

    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            *self / mag
        } else {
            Self::zero()
        }
    }

    /// Clamps the magnitude to `max`, keeping the direction.
    pub fn limit(&self, max: f32) -> Self {
        if self.magnitude() > max {
            self.normalize() * max
        } else {
            *self
        }
    }

    /// Euclidean distance between two points.
    pub fn distance(&self, other: &Vector2D) -> f32 {
        (*other - *self).magnitude()
    }

    /// Angle of the vector in radians, as used for drawing headings.
    pub fn heading(&self) -> f32 {
        atan2(self.y, self.x)
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Div<f32> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        if scalar == 0.0 {
            return Self::zero();
        }
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector2d_new() {
        let v = Vector2D::new(3.0, 4.0);
        assert_eq!(v.x, 3.0);
        assert_eq!(v.y, 4.0);
    }

    #[test]
    fn test_vector2d_magnitude() {
        let v = Vector2D::new(3.0, 4.0);
        assert_eq!(v.magnitude(), 5.0);
    }

    #[test]
    fn test_vector2d_normalize() {
        for v in [
            Vector2D::new(3.0, 4.0),
            Vector2D::new(-0.001, 0.0),
            Vector2D::new(1e6, -2e6),
            Vector2D::new(0.0, -7.5),
        ] {
            let normalized = v.normalize();
            assert!((normalized.magnitude() - 1.0).abs() < 0.0001, "{:?}", v);
        }
    }

    #[test]
    fn test_vector2d_normalize_zero() {
        let normalized = Vector2D::zero().normalize();
        assert_eq!(normalized, Vector2D::zero());
        assert!(normalized.x.is_finite() && normalized.y.is_finite());
    }

    #[test]
    fn test_vector2d_divide_by_zero() {
        assert_eq!(Vector2D::new(5.0, -2.0) / 0.0, Vector2D::zero());
        assert_eq!(Vector2D::new(6.0, -2.0) / 2.0, Vector2D::new(3.0, -1.0));
    }

    #[test]
    fn test_vector2d_limit() {
        let v = Vector2D::new(30.0, 40.0).limit(5.0);
        assert!((v.x - 3.0).abs() < 0.0001);
        assert!((v.y - 4.0).abs() < 0.0001);

        let short = Vector2D::new(1.0, 1.0);
        assert_eq!(short.limit(5.0), short);
    }

    #[test]
    fn test_vector2d_distance() {
        let a = Vector2D::new(1.0, 1.0);
        let b = Vector2D::new(4.0, 5.0);
        assert_eq!(Vector2D::distance(&a, &b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn test_vector2d_operations() {
        let v1 = Vector2D::new(1.0, 2.0);
        let v2 = Vector2D::new(3.0, 4.0);

        let sum = v1 + v2;
        assert_eq!(sum.x, 4.0);
        assert_eq!(sum.y, 6.0);

        let diff = v2 - v1;
        assert_eq!(diff.x, 2.0);
        assert_eq!(diff.y, 2.0);

        let scaled = v1 * 2.0;
        assert_eq!(scaled.x, 2.0);
        assert_eq!(scaled.y, 4.0);
    }

    #[test]
    fn test_vector2d_heading() {
        assert_eq!(Vector2D::new(1.0, 0.0).heading(), 0.0);
        let up = Vector2D::new(0.0, 2.0).heading();
        assert!((up - core::f32::consts::FRAC_PI_2).abs() < 0.0001);
    }
}
