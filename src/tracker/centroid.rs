use nalgebra::Point3;

use crate::error::{Result, TrackError};

/// Centre of one labeled region in a frame, in voxel coordinates.
///
/// `weight` is the region's voxel count. It travels with the centroid as a
/// label and plays no part in distance computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Centroid {
    pub x: u32,
    pub y: u32,
    pub z: u32,
    pub weight: u32,
}

impl Centroid {
    /// Create a centroid from voxel coordinates and a voxel count.
    #[inline]
    pub fn new(x: u32, y: u32, z: u32, weight: u32) -> Self {
        Self { x, y, z, weight }
    }

    /// Build a centroid from signed provider output, rejecting negative
    /// coordinates and empty regions.
    pub fn try_from_signed(x: i64, y: i64, z: i64, weight: i64) -> Result<Self> {
        let invalid = |reason| TrackError::InvalidCentroid {
            x,
            y,
            z,
            weight,
            reason,
        };

        if x < 0 || y < 0 || z < 0 {
            return Err(invalid("negative coordinate"));
        }
        if weight < 1 {
            return Err(invalid("weight must be at least 1"));
        }

        let narrow = |v: i64| u32::try_from(v).map_err(|_| invalid("value exceeds u32 range"));
        Ok(Self::new(narrow(x)?, narrow(y)?, narrow(z)?, narrow(weight)?))
    }

    /// Spatial position as a floating-point point.
    #[inline]
    pub fn position(&self) -> Point3<f64> {
        Point3::new(self.x as f64, self.y as f64, self.z as f64)
    }

    /// Euclidean distance on `x, y, z`.
    #[inline]
    pub fn distance(&self, other: &Centroid) -> f64 {
        nalgebra::distance(&self.position(), &other.position())
    }

    /// Coordinates without the weight.
    #[inline]
    pub fn coords(&self) -> [u32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[u32; 4]> for Centroid {
    fn from([x, y, z, weight]: [u32; 4]) -> Self {
        Self::new(x, y, z, weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_ignores_weight() {
        let a = Centroid::new(0, 0, 0, 1);
        let b = Centroid::new(3, 4, 0, 500);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
        assert_eq!(a.distance(&b), b.distance(&a));
    }

    #[test]
    fn test_distance_three_axes() {
        let a = Centroid::new(1, 2, 3, 1);
        let b = Centroid::new(3, 5, 9, 1);
        // sqrt(4 + 9 + 36) = 7
        assert!((a.distance(&b) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_try_from_signed() {
        let c = Centroid::try_from_signed(4, 5, 6, 7).unwrap();
        assert_eq!(c, Centroid::new(4, 5, 6, 7));

        assert!(matches!(
            Centroid::try_from_signed(-1, 0, 0, 1),
            Err(TrackError::InvalidCentroid {
                reason: "negative coordinate",
                ..
            })
        ));
        assert!(Centroid::try_from_signed(0, 0, 0, 0).is_err());
        assert!(Centroid::try_from_signed(1 << 40, 0, 0, 1).is_err());
    }

    #[test]
    fn test_from_array() {
        let c: Centroid = [1, 2, 3, 4].into();
        assert_eq!(c.coords(), [1, 2, 3]);
        assert_eq!(c.weight, 4);
    }
}
