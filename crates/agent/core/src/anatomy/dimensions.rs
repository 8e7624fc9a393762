//! Physical dimensions of a body part.

use crate::error::{AnatomyError, Result};

/// Width, height and depth in meters, weight in kilograms.
///
/// All values are strictly positive; [`Dimensions::new`] is the only
/// constructor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    width: f64,
    height: f64,
    depth: f64,
    weight: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64, depth: f64, weight: f64) -> Result<Self> {
        // Written as negated comparisons so NaN is rejected too.
        let positive = |v: f64| v > 0.0;
        if !(positive(width) && positive(height) && positive(depth) && positive(weight)) {
            return Err(AnatomyError::InvalidDimensions {
                width,
                height,
                depth,
                weight,
            });
        }

        Ok(Self {
            width,
            height,
            depth,
            weight,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Volume in cubic meters.
    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth
    }

    /// Surface area of the bounding box in square meters.
    pub fn surface_area(&self) -> f64 {
        2.0 * (self.width * self.height + self.height * self.depth + self.depth * self.width)
    }

    /// Density in kg/m³.
    pub fn density(&self) -> f64 {
        self.weight / self.volume()
    }

    /// Scales every dimension, weight included, by `factor`.
    pub fn scale(&self, factor: f64) -> Result<Self> {
        Self::new(
            self.width * factor,
            self.height * factor,
            self.depth * factor,
            self.weight * factor,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_values() {
        assert!(matches!(
            Dimensions::new(0.0, 1.0, 1.0, 1.0),
            Err(AnatomyError::InvalidDimensions { .. })
        ));
        assert!(Dimensions::new(1.0, -1.0, 1.0, 1.0).is_err());
        assert!(Dimensions::new(1.0, 1.0, 0.0, 1.0).is_err());
        assert!(Dimensions::new(1.0, 1.0, 1.0, 0.0).is_err());
        assert!(Dimensions::new(f64::NAN, 1.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn derived_measures() {
        let dims = Dimensions::new(0.5, 0.8, 0.4, 45.0).unwrap();

        assert!((dims.volume() - 0.16).abs() < 1e-12);
        assert!((dims.surface_area() - 2.0 * (0.4 + 0.32 + 0.2)).abs() < 1e-12);
        assert!((dims.density() - 281.25).abs() < 1e-9);
    }

    #[test]
    fn scale_multiplies_every_field() {
        let dims = Dimensions::new(0.2, 0.7, 0.2, 20.0).unwrap();
        let doubled = dims.scale(2.0).unwrap();

        assert_eq!(doubled.weight(), 40.0);
        assert!((doubled.height() - 1.4).abs() < 1e-12);
        assert!(dims.scale(0.0).is_err());
    }
}
