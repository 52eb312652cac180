//! A dimensioned scalar: the mean carrier of a bounded quantity.

use super::error::ArithmeticError;
use super::units::Unit;
use std::fmt;

/// A magnitude together with its unit.
#[derive(Debug, Clone)]
pub struct Quantity {
    pub magnitude: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(magnitude: f64, unit: Unit) -> Self {
        Self { magnitude, unit }
    }

    pub fn dimensionless(magnitude: f64) -> Self {
        Self::new(magnitude, Unit::dimensionless())
    }

    /// An exactly-zero dimensionless value is the additive identity for any
    /// dimension, so container costs of plain `0` sum into dimensioned totals.
    pub fn is_additive_identity(&self) -> bool {
        self.magnitude == 0.0 && self.unit.is_dimensionless()
    }

    pub fn to(&self, unit: &Unit) -> Result<Quantity, ArithmeticError> {
        let factor = self.unit.conversion_factor(unit)?;
        Ok(Quantity::new(self.magnitude * factor, unit.clone()))
    }

    pub fn ito(&mut self, unit: &Unit) -> Result<(), ArithmeticError> {
        *self = self.to(unit)?;
        Ok(())
    }

    pub fn add(&self, other: &Quantity) -> Result<Quantity, ArithmeticError> {
        if self.unit.dimension() == other.unit.dimension() {
            let aligned = other.to(&self.unit)?;
            Ok(Quantity::new(
                self.magnitude + aligned.magnitude,
                self.unit.clone(),
            ))
        } else if other.is_additive_identity() {
            Ok(self.clone())
        } else if self.is_additive_identity() {
            Ok(other.clone())
        } else {
            Err(ArithmeticError::UnitMismatch {
                left: self.unit.to_string(),
                right: other.unit.to_string(),
            })
        }
    }

    pub fn sub(&self, other: &Quantity) -> Result<Quantity, ArithmeticError> {
        if self.unit.dimension() == other.unit.dimension() {
            let aligned = other.to(&self.unit)?;
            Ok(Quantity::new(
                self.magnitude - aligned.magnitude,
                self.unit.clone(),
            ))
        } else if other.is_additive_identity() {
            Ok(self.clone())
        } else if self.is_additive_identity() {
            Ok(other.neg())
        } else {
            Err(ArithmeticError::UnitMismatch {
                left: self.unit.to_string(),
                right: other.unit.to_string(),
            })
        }
    }

    pub fn mul(&self, other: &Quantity) -> Quantity {
        let mut unit = self.unit.clone();
        unit.multiply(&other.unit);
        Quantity::new(self.magnitude * other.magnitude, unit)
    }

    pub fn div(&self, other: &Quantity) -> Quantity {
        let mut unit = self.unit.clone();
        unit.divide(&other.unit);
        Quantity::new(self.magnitude / other.magnitude, unit)
    }

    pub fn powf(&self, exponent: f64) -> Result<Quantity, ArithmeticError> {
        let unit = self.unit.pow_scaled(exponent)?;
        Ok(Quantity::new(self.magnitude.powf(exponent), unit))
    }

    pub fn neg(&self) -> Quantity {
        Quantity::new(-self.magnitude, self.unit.clone())
    }

    pub fn abs(&self) -> Quantity {
        Quantity::new(self.magnitude.abs(), self.unit.clone())
    }
}

impl PartialEq for Quantity {
    /// Conversion-aware equality: `0.9144 m == 1 yd`.
    fn eq(&self, other: &Self) -> bool {
        match other.unit.conversion_factor(&self.unit) {
            Ok(factor) => self.magnitude == other.magnitude * factor,
            Err(_) => false,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_dimensionless() {
            write!(f, "{}", self.magnitude)
        } else {
            write!(f, "{} {}", self.magnitude, self.unit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::units::BaseUnit;

    fn meters(v: f64) -> Quantity {
        Quantity::new(v, Unit::base(BaseUnit::Meter))
    }

    #[test]
    fn add_converts_into_left_unit() {
        let yd = Quantity::new(1.0, Unit::base(BaseUnit::Yard));
        let sum = meters(1.0).add(&yd).unwrap();
        assert_eq!(sum.unit, Unit::base(BaseUnit::Meter));
        assert!((sum.magnitude - 1.9144).abs() < 1e-12);
    }

    #[test]
    fn add_rejects_mismatched_dimensions() {
        let kg = Quantity::new(1.0, Unit::base(BaseUnit::Kilogram));
        assert!(meters(1.0).add(&kg).is_err());
    }

    #[test]
    fn zero_is_additive_identity_for_any_dimension() {
        let m = meters(2.0);
        assert_eq!(m.add(&Quantity::dimensionless(0.0)).unwrap(), m);
        assert_eq!(Quantity::dimensionless(0.0).add(&m).unwrap(), m);
        assert_eq!(Quantity::dimensionless(0.0).sub(&m).unwrap(), m.neg());
    }

    #[test]
    fn mul_div_merge_units() {
        let area = meters(2.0).mul(&meters(3.0));
        assert_eq!(area.unit.to_string(), "m^2");
        assert_eq!(area.magnitude, 6.0);

        let ratio = area.div(&meters(2.0));
        assert_eq!(ratio.unit.to_string(), "m");
        assert_eq!(ratio.magnitude, 3.0);
    }

    #[test]
    fn conversion_aware_equality() {
        let yd = Quantity::new(1.0, Unit::base(BaseUnit::Yard));
        assert_eq!(meters(0.9144), yd);
        assert_ne!(meters(1.0), yd);
    }

    #[test]
    fn sqrt_of_area_is_length() {
        let side = meters(2.0).mul(&meters(2.0)).powf(0.5).unwrap();
        assert_eq!(side, meters(2.0));
    }
}
