//! The bounded quantity: a mean value with independently evolving lower and
//! upper bounds, closed under arithmetic.
//!
//! Every operator comes in two explicit forms: a pure method returning a new,
//! fully independent value, and an `_assign` method mutating the receiver in
//! place. Callers holding another reference to the receiver observe the
//! in-place mutation; pure methods never touch their operands.

use super::error::ArithmeticError;
use super::units::Unit;
use super::value::Quantity;
use std::fmt;

/// The raw binary operations the extremal bound rule is applied to.
#[derive(Debug, Clone, Copy)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Op {
    fn raw(self, a: f64, b: f64) -> f64 {
        match self {
            Op::Add => a + b,
            Op::Sub => a - b,
            Op::Mul => a * b,
            Op::Div => a / b,
            Op::Pow => a.powf(b),
        }
    }
}

/// Right-hand operand of a bounded-quantity operation. Plain quantities and
/// scalars are degenerate bounded quantities of zero width.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Bounded(&'a BoundedQuantity),
    Value(&'a Quantity),
    Scalar(f64),
}

impl Operand<'_> {
    /// Mean plus raw bound magnitudes.
    fn parts(self) -> (Quantity, f64, f64) {
        match self {
            Operand::Bounded(bq) => (bq.mean.clone(), bq.lower, bq.upper),
            Operand::Value(q) => (q.clone(), q.magnitude, q.magnitude),
            Operand::Scalar(s) => (Quantity::dimensionless(s), s, s),
        }
    }
}

impl<'a> From<&'a BoundedQuantity> for Operand<'a> {
    fn from(bq: &'a BoundedQuantity) -> Self {
        Operand::Bounded(bq)
    }
}

impl<'a> From<&'a Quantity> for Operand<'a> {
    fn from(q: &'a Quantity) -> Self {
        Operand::Value(q)
    }
}

impl From<f64> for Operand<'_> {
    fn from(s: f64) -> Self {
        Operand::Scalar(s)
    }
}

/// A quantity whose true value is only known to lie within `[lower, upper]`,
/// with best estimate `mean`.
///
/// Invariant: `lower <= mean.magnitude <= upper`, with the bounds expressed
/// as raw magnitudes in the mean's own unit. The bound setters re-clamp
/// against the mean, so the invariant survives every mutation.
#[derive(Debug, Clone)]
pub struct BoundedQuantity {
    mean: Quantity,
    lower: f64,
    upper: f64,
}

impl BoundedQuantity {
    /// Zero-width bounded quantity: both bounds collapse onto the mean.
    pub fn new(mean: Quantity) -> Self {
        let m = mean.magnitude;
        Self {
            mean,
            lower: m,
            upper: m,
        }
    }

    /// Bounds are clamped against the mean: a bound on the wrong side of the
    /// mean is pulled back to it.
    pub fn with_bounds(mean: Quantity, bounds: (f64, f64)) -> Self {
        let m = mean.magnitude;
        let lo = bounds.0.min(bounds.1);
        let hi = bounds.0.max(bounds.1);
        Self {
            mean,
            lower: lo.min(m),
            upper: hi.max(m),
        }
    }

    /// The dimensionless zero, the additive identity for any dimension.
    pub fn zero() -> Self {
        Self::new(Quantity::dimensionless(0.0))
    }

    /// The dimensionless one.
    pub fn one() -> Self {
        Self::new(Quantity::dimensionless(1.0))
    }

    pub fn mean(&self) -> &Quantity {
        &self.mean
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn unit(&self) -> &Unit {
        &self.mean.unit
    }

    /// `[lower, mean, upper]` magnitudes, the report row form.
    pub fn magnitudes(&self) -> [f64; 3] {
        [self.lower, self.mean.magnitude, self.upper]
    }

    pub fn set_lower(&mut self, value: f64) {
        self.lower = value.min(self.mean.magnitude);
    }

    pub fn set_upper(&mut self, value: f64) {
        self.upper = value.max(self.mean.magnitude);
    }

    /// Core of every binary operator: the mean follows the plain quantity
    /// arithmetic, while the new bounds are the min/max over the four corner
    /// combinations of the operand bound boxes. The four-corner enumeration
    /// is required because the operation need not be monotonic in a fixed
    /// direction (subtraction, division).
    fn binary_assign(&mut self, other: Operand<'_>, op: Op) -> Result<(), ArithmeticError> {
        let (mut om, mut ol, mut ou) = other.parts();

        let new_mean = match op {
            Op::Add | Op::Sub => {
                // Bounds are raw magnitudes, so the operand must be brought
                // into the receiver's unit before the corner rule applies.
                if self.mean.unit.dimension() == om.unit.dimension() {
                    let factor = om.unit.conversion_factor(&self.mean.unit)?;
                    om = om.to(&self.mean.unit)?;
                    ol *= factor;
                    ou *= factor;
                } else if om.is_additive_identity() {
                    om = Quantity::new(0.0, self.mean.unit.clone());
                } else if self.mean.is_additive_identity() {
                    self.mean.unit = om.unit.clone();
                } else {
                    return Err(ArithmeticError::UnitMismatch {
                        left: self.mean.unit.to_string(),
                        right: om.unit.to_string(),
                    });
                }
                match op {
                    Op::Add => self.mean.add(&om)?,
                    _ => self.mean.sub(&om)?,
                }
            }
            Op::Mul => self.mean.mul(&om),
            Op::Div => self.mean.div(&om),
            Op::Pow => self.mean.powf(om.magnitude)?,
        };

        let corners = [
            op.raw(self.upper, ol),
            op.raw(self.lower, ou),
            op.raw(self.upper, ou),
            op.raw(self.lower, ol),
        ];
        let lo = corners.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = corners.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        self.mean = new_mean;
        self.set_lower(lo);
        self.set_upper(hi);
        Ok(())
    }

    fn binary(&self, other: Operand<'_>, op: Op) -> Result<BoundedQuantity, ArithmeticError> {
        let mut out = self.clone();
        out.binary_assign(other, op)?;
        Ok(out)
    }

    pub fn add<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self, ArithmeticError> {
        self.binary(other.into(), Op::Add)
    }

    pub fn add_assign<'a>(&mut self, other: impl Into<Operand<'a>>) -> Result<(), ArithmeticError> {
        self.binary_assign(other.into(), Op::Add)
    }

    pub fn sub<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self, ArithmeticError> {
        self.binary(other.into(), Op::Sub)
    }

    pub fn sub_assign<'a>(&mut self, other: impl Into<Operand<'a>>) -> Result<(), ArithmeticError> {
        self.binary_assign(other.into(), Op::Sub)
    }

    pub fn mul<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self, ArithmeticError> {
        self.binary(other.into(), Op::Mul)
    }

    pub fn mul_assign<'a>(&mut self, other: impl Into<Operand<'a>>) -> Result<(), ArithmeticError> {
        self.binary_assign(other.into(), Op::Mul)
    }

    pub fn div<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self, ArithmeticError> {
        self.binary(other.into(), Op::Div)
    }

    pub fn div_assign<'a>(&mut self, other: impl Into<Operand<'a>>) -> Result<(), ArithmeticError> {
        self.binary_assign(other.into(), Op::Div)
    }

    /// Exponentiation by a plain real exponent, treated as a degenerate
    /// zero-width operand.
    pub fn powf(&self, exponent: f64) -> Result<Self, ArithmeticError> {
        self.binary(Operand::Scalar(exponent), Op::Pow)
    }

    pub fn powf_assign(&mut self, exponent: f64) -> Result<(), ArithmeticError> {
        self.binary_assign(Operand::Scalar(exponent), Op::Pow)
    }

    /// `lhs / self`, composed as `(self / lhs) ^ -1`. The exponent step goes
    /// through the corner rule again, so the result can be wider than the
    /// analytically tightest inverse. Known conservative widening, kept.
    pub fn rdiv<'a>(&self, lhs: impl Into<Operand<'a>>) -> Result<Self, ArithmeticError> {
        self.div(lhs)?.powf(-1.0)
    }

    /// Negation reflects the bound box through zero.
    pub fn neg(&self) -> Self {
        Self {
            mean: self.mean.neg(),
            lower: -self.upper,
            upper: -self.lower,
        }
    }

    /// Takes `|lower|`/`|upper|` directly, not through the corner rule: only
    /// correct when the interval does not straddle zero. Known-narrow
    /// behavior, kept as documented.
    pub fn abs(&self) -> Self {
        Self::with_bounds(self.mean.abs(), (self.lower.abs(), self.upper.abs()))
    }

    /// Rescales into `unit`. Each bound is reconverted by the same linear
    /// factor independently, then re-ordered by min/max.
    pub fn ito(&mut self, unit: &Unit) -> Result<(), ArithmeticError> {
        let factor = self.mean.unit.conversion_factor(unit)?;
        let bounds = (self.lower * factor, self.upper * factor);
        self.mean.ito(unit)?;
        self.set_lower(bounds.0.min(bounds.1));
        self.set_upper(bounds.0.max(bounds.1));
        Ok(())
    }

    pub fn to(&self, unit: &Unit) -> Result<Self, ArithmeticError> {
        let mut out = self.clone();
        out.ito(unit)?;
        Ok(out)
    }
}

impl PartialEq for BoundedQuantity {
    /// Means compare conversion-aware, bounds compare as raw magnitudes.
    /// A bounded quantity never equals a plain `Quantity`.
    fn eq(&self, other: &Self) -> bool {
        self.mean == other.mean && self.lower == other.lower && self.upper == other.upper
    }
}

impl fmt::Display for BoundedQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, [{} ; {}]", self.mean, self.lower, self.upper)
    }
}
