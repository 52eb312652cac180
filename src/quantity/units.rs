//! Unit algebra: a closed registry of base units and a canonical
//! exponent-map unit type with linear conversion between compatible units.

use super::error::{ArithmeticError, ParseError};
use std::collections::BTreeMap;
use std::fmt;

/// Tolerance when deciding whether a scaled exponent is integral.
const EXPONENT_EPS: f64 = 1e-9;

/// The closed set of base units the engine understands.
///
/// Each base unit carries a dimension vector (length, mass, time) and a
/// linear factor to the SI base of that dimension. `work_day` is a unit of
/// labor time (one 8-hour day), so travel times convert into labor-days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseUnit {
    Meter,
    Yard,
    Kilometer,
    Liter,
    Kilogram,
    Tonne,
    Second,
    Hour,
    WorkDay,
}

impl BaseUnit {
    pub const ALL: [BaseUnit; 9] = [
        BaseUnit::Meter,
        BaseUnit::Yard,
        BaseUnit::Kilometer,
        BaseUnit::Liter,
        BaseUnit::Kilogram,
        BaseUnit::Tonne,
        BaseUnit::Second,
        BaseUnit::Hour,
        BaseUnit::WorkDay,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            BaseUnit::Meter => "m",
            BaseUnit::Yard => "yd",
            BaseUnit::Kilometer => "km",
            BaseUnit::Liter => "l",
            BaseUnit::Kilogram => "kg",
            BaseUnit::Tonne => "t",
            BaseUnit::Second => "s",
            BaseUnit::Hour => "h",
            BaseUnit::WorkDay => "work_day",
        }
    }

    /// Dimension vector as (length, mass, time) exponents.
    fn dimension(self) -> [i32; 3] {
        match self {
            BaseUnit::Meter | BaseUnit::Yard | BaseUnit::Kilometer => [1, 0, 0],
            BaseUnit::Liter => [3, 0, 0],
            BaseUnit::Kilogram | BaseUnit::Tonne => [0, 1, 0],
            BaseUnit::Second | BaseUnit::Hour | BaseUnit::WorkDay => [0, 0, 1],
        }
    }

    /// Linear factor to the SI base of this unit's dimension.
    fn si_factor(self) -> f64 {
        match self {
            BaseUnit::Meter => 1.0,
            BaseUnit::Yard => 0.9144,
            BaseUnit::Kilometer => 1000.0,
            BaseUnit::Liter => 1e-3,
            BaseUnit::Kilogram => 1.0,
            BaseUnit::Tonne => 1000.0,
            BaseUnit::Second => 1.0,
            BaseUnit::Hour => 3600.0,
            BaseUnit::WorkDay => 8.0 * 3600.0,
        }
    }

    fn from_symbol(s: &str) -> Option<BaseUnit> {
        BaseUnit::ALL.iter().copied().find(|u| u.symbol() == s)
    }
}

/// A canonical product of base-unit factors with integer exponents.
/// Example: `kg/m^3` is `{ kg: 1, m: -3 }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unit {
    terms: BTreeMap<BaseUnit, i32>,
}

impl Unit {
    pub fn dimensionless() -> Self {
        Self::default()
    }

    pub fn base(unit: BaseUnit) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(unit, 1);
        Self { terms }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.terms.is_empty()
    }

    fn insert_term(&mut self, base: BaseUnit, delta: i32) {
        let entry = self.terms.entry(base).or_insert(0);
        *entry += delta;
        if *entry == 0 {
            self.terms.remove(&base);
        }
    }

    pub fn multiply(&mut self, other: &Unit) {
        for (&base, &exp) in &other.terms {
            self.insert_term(base, exp);
        }
    }

    pub fn divide(&mut self, other: &Unit) {
        for (&base, &exp) in &other.terms {
            self.insert_term(base, -exp);
        }
    }

    /// The unit `self/other` as a new value.
    pub fn per(&self, other: &Unit) -> Unit {
        let mut out = self.clone();
        out.divide(other);
        out
    }

    /// Raises the unit to a real power. Every scaled exponent must come out
    /// integral (so `(m^2)^0.5` is `m`, but `m^0.5` is rejected).
    pub fn pow_scaled(&self, exponent: f64) -> Result<Unit, ArithmeticError> {
        let mut out = Unit::dimensionless();
        for (&base, &exp) in &self.terms {
            let scaled = f64::from(exp) * exponent;
            let rounded = scaled.round();
            if (scaled - rounded).abs() > EXPONENT_EPS {
                return Err(ArithmeticError::FractionalDimension {
                    unit: self.to_string(),
                    exponent,
                });
            }
            out.insert_term(base, rounded as i32);
        }
        Ok(out)
    }

    /// Overall dimension vector (length, mass, time).
    pub fn dimension(&self) -> [i32; 3] {
        let mut dim = [0; 3];
        for (&base, &exp) in &self.terms {
            let base_dim = base.dimension();
            for i in 0..3 {
                dim[i] += base_dim[i] * exp;
            }
        }
        dim
    }

    /// Product of the base-unit SI factors, raised to their exponents.
    fn si_factor(&self) -> f64 {
        self.terms
            .iter()
            .map(|(&base, &exp)| base.si_factor().powi(exp))
            .product()
    }

    /// Linear factor converting a magnitude in `self` into one in `target`.
    /// Fails when the dimensions differ.
    pub fn conversion_factor(&self, target: &Unit) -> Result<f64, ArithmeticError> {
        if self.dimension() != target.dimension() {
            return Err(ArithmeticError::UnitMismatch {
                left: self.to_string(),
                right: target.to_string(),
            });
        }
        Ok(self.si_factor() / target.si_factor())
    }

    /// Parses a unit expression of the form `num/den`, where each side is a
    /// `*`-separated product of `base^exp` factors. Empty input and `1` are
    /// the dimensionless unit.
    pub fn parse(s: &str) -> Result<Unit, ParseError> {
        let s = s.trim();
        let mut unit = Unit::dimensionless();
        if s.is_empty() {
            return Ok(unit);
        }

        let mut parts = s.split('/');
        if let Some(num) = parts.next() {
            Self::parse_product(num, 1, &mut unit)?;
        }
        if let Some(den) = parts.next() {
            Self::parse_product(den, -1, &mut unit)?;
        }
        if parts.next().is_some() {
            return Err(ParseError::MalformedUnit(s.to_string()));
        }
        Ok(unit)
    }

    fn parse_product(s: &str, sign: i32, unit: &mut Unit) -> Result<(), ParseError> {
        let s = s.trim();
        if s.is_empty() || s == "1" {
            return Ok(());
        }
        for factor in s.split('*') {
            let mut factor_parts = factor.split('^');
            let base = factor_parts.next().unwrap_or("").trim();
            if base.is_empty() {
                return Err(ParseError::MalformedUnit(s.to_string()));
            }
            let exp = match factor_parts.next() {
                Some(e) => e
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| ParseError::MalformedUnit(s.to_string()))?,
                None => 1,
            };
            // kph is the one composite symbol the registry accepts.
            if base == "kph" {
                unit.insert_term(BaseUnit::Kilometer, exp * sign);
                unit.insert_term(BaseUnit::Hour, -exp * sign);
            } else {
                let b = BaseUnit::from_symbol(base)
                    .ok_or_else(|| ParseError::UnknownUnit(base.to_string()))?;
                unit.insert_term(b, exp * sign);
            }
        }
        Ok(())
    }
}

impl fmt::Display for Unit {
    /// Canonical form: factors sorted alphabetically, numerator and
    /// denominator joined with `/`, exponents written as `^n`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return Ok(());
        }

        let (num, den): (Vec<_>, Vec<_>) = self
            .terms
            .iter()
            .partition(|&(_, &exp)| exp > 0);

        let fmt_product = |mut factors: Vec<(&BaseUnit, &i32)>| -> String {
            if factors.is_empty() {
                return "1".to_string();
            }
            factors.sort_by_key(|(base, _)| base.symbol());
            factors
                .into_iter()
                .map(|(base, &exp)| {
                    if exp.abs() == 1 {
                        base.symbol().to_string()
                    } else {
                        format!("{}^{}", base.symbol(), exp.abs())
                    }
                })
                .collect::<Vec<_>>()
                .join("*")
        };

        let num_str = fmt_product(num);
        let den_str = fmt_product(den);
        if den_str == "1" {
            write!(f, "{num_str}")
        } else {
            write!(f, "{num_str}/{den_str}")
        }
    }
}
