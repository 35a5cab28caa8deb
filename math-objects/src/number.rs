//! Scalar type used for point coordinates.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A real number that remembers whether it is integral or floating point.
///
/// Integer arithmetic stays integral as long as both operands are integers, and is promoted to
/// floating point as soon as one of them is a float. True division ([`Number::true_div`] or `/`)
/// always produces a float.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
}

impl Number {
    /// Returns the value converted to `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    /// Returns the integer value, or `None` for floats.
    pub fn as_int(self) -> Option<i64> {
        match self {
            Number::Int(v) => Some(v),
            Number::Float(_) => None,
        }
    }

    /// Returns true if the number is stored as an integer.
    pub fn is_int(self) -> bool {
        matches!(self, Number::Int(_))
    }

    /// Division rounding toward negative infinity.
    ///
    /// Integer operands give an integer result (`-7 // 2 == -4`). If either operand is a float,
    /// the result is the floor of the exact quotient, see [`floor_div_f64`]. Division by zero
    /// gives `inf`, `-inf` or `NaN`.
    pub fn floor_div(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) if b != 0 => Number::Int(floor_div_i64(a, b)),
            (a, b) => Number::Float(floor_div_f64(a.as_f64(), b.as_f64())),
        }
    }

    /// Real division. The divisor is always promoted to floating point.
    pub fn true_div(self, rhs: Number) -> Number {
        Number::Float(self.as_f64() / rhs.as_f64())
    }
}

fn floor_div_i64(a: i64, b: i64) -> i64 {
    let quotient = a.wrapping_div(b);
    if a.wrapping_rem(b) != 0 && ((a < 0) != (b < 0)) {
        quotient - 1
    } else {
        quotient
    }
}

/// Floor of the exact quotient `a / b`.
///
/// `(a / b).floor()` can be off by one because the quotient is rounded before flooring
/// (`1.0 / 0.1` rounds to `10.0`). The quotient is computed from the remainder instead, so
/// `floor_div_f64(1.0, 0.1) == 9.0`.
pub fn floor_div_f64(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        return (a / b).floor();
    }

    let remainder = a % b;
    let mut div = (a - remainder) / b;
    if remainder != 0.0 && (b < 0.0) != (remainder < 0.0) {
        div -= 1.0;
    }

    if div == 0.0 {
        return 0.0_f64.copysign(a / b);
    }

    let floor = div.floor();
    if div - floor > 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Integer value of `v` if it is integral and representable as `i64`.
fn exact_int(v: f64) -> Option<i64> {
    if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

impl Default for Number {
    fn default() -> Self {
        Number::Int(0)
    }
}

macro_rules! impl_number_op {
    ($trait:ident, $method:ident, $int_op:ident, $op:tt) => {
        impl std::ops::$trait for Number {
            type Output = Number;

            fn $method(self, rhs: Number) -> Number {
                match (self, rhs) {
                    (Number::Int(a), Number::Int(b)) => Number::Int(a.$int_op(b)),
                    (a, b) => Number::Float(a.as_f64() $op b.as_f64()),
                }
            }
        }
    };
}

impl_number_op!(Add, add, wrapping_add, +);
impl_number_op!(Sub, sub, wrapping_sub, -);
impl_number_op!(Mul, mul, wrapping_mul, *);

impl std::ops::Div for Number {
    type Output = Number;

    fn div(self, rhs: Number) -> Number {
        self.true_div(rhs)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b,
            (Number::Int(i), Number::Float(f)) | (Number::Float(f), Number::Int(i)) => {
                exact_int(f) == Some(i)
            }
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Integral floats must hash like the equal integer.
        match *self {
            Number::Int(v) => v.hash(state),
            Number::Float(v) => match exact_int(v) {
                Some(i) => i.hash(state),
                None => v.to_bits().hash(state),
            },
        }
    }
}

/// Integers are written as is. Floats always have a decimal point or an exponent (`1.0`, `0.25`),
/// use scientific notation with a signed two-digit exponent outside of `[1e-4, 1e16)` (`1e+20`,
/// `1e-05`) and write special values as `nan`, `inf` and `-inf`.
impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Number::Int(v) => write!(f, "{v}"),
            Number::Float(v) => fmt_float(v, f),
        }
    }
}

fn fmt_float(v: f64, f: &mut Formatter<'_>) -> std::fmt::Result {
    if v.is_nan() {
        return f.write_str("nan");
    }
    if v.is_infinite() {
        return f.write_str(if v > 0.0 { "inf" } else { "-inf" });
    }
    if v == 0.0 {
        return write!(f, "{v:?}");
    }

    let scientific = format!("{v:e}");
    let parsed = scientific
        .split_once('e')
        .and_then(|(mantissa, exponent)| Some((mantissa, exponent.parse::<i32>().ok()?)));
    match parsed {
        Some((mantissa, exponent)) if !(-4..16).contains(&exponent) => {
            let sign = if exponent < 0 { '-' } else { '+' };
            write!(f, "{mantissa}e{sign}{:02}", exponent.unsigned_abs())
        }
        // Debug formatting keeps the trailing `.0` of integral floats.
        _ => write!(f, "{v:?}"),
    }
}

impl ToPrimitive for Number {
    fn to_i64(&self) -> Option<i64> {
        match *self {
            Number::Int(v) => Some(v),
            Number::Float(v) => v.to_i64(),
        }
    }

    fn to_u64(&self) -> Option<u64> {
        match *self {
            Number::Int(v) => v.to_u64(),
            Number::Float(v) => v.to_u64(),
        }
    }

    fn to_f64(&self) -> Option<f64> {
        Some(self.as_f64())
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Number {
            fn from(value: $t) -> Self {
                Number::Int(i64::from(value))
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Number {
            fn from(value: $t) -> Self {
                match i64::try_from(value) {
                    Ok(v) => Number::Int(v),
                    Err(_) => Number::Float(value as f64),
                }
            }
        })*
    };
}

impl_from_wide_int!(isize, usize, u64, i128, u128);

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(f64::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use assert_matches::assert_matches;

    use super::*;

    fn hash_of(n: Number) -> u64 {
        let mut hasher = DefaultHasher::new();
        n.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn integer_arithmetic_stays_integral() {
        assert_matches!(Number::Int(2) + Number::Int(3), Number::Int(5));
        assert_matches!(Number::Int(2) * Number::Int(3), Number::Int(6));
        assert_matches!(Number::Int(2) - Number::Int(3), Number::Int(-1));
    }

    #[test]
    fn mixed_arithmetic_promotes() {
        assert!(!(Number::Int(2) + Number::Float(0.5)).is_int());
        assert_eq!(Number::Int(2) + Number::Float(0.5), Number::Float(2.5));
        assert_eq!(Number::Float(1.5) * Number::Int(2), Number::Float(3.0));
    }

    #[test]
    fn floor_division_rounds_down() {
        assert_matches!(Number::Int(5).floor_div(Number::Int(2)), Number::Int(2));
        assert_matches!(
            Number::Int(-7).floor_div(Number::Int(2)),
            Number::Int(-4)
        );
        assert_matches!(
            Number::Int(7).floor_div(Number::Int(-2)),
            Number::Int(-4)
        );
        assert_matches!(
            Number::Int(-6).floor_div(Number::Int(-2)),
            Number::Int(3)
        );
        assert_eq!(Number::Float(5.5).floor_div(Number::Int(2)), Number::Float(2.0));
        assert_eq!(
            Number::Float(-5.5).floor_div(Number::Int(2)),
            Number::Float(-3.0)
        );
    }

    #[test]
    fn float_floor_division_uses_exact_quotient() {
        assert_eq!(Number::Int(1).floor_div(Number::Float(0.1)), Number::Float(9.0));
        assert_eq!(Number::Int(-1).floor_div(Number::Float(0.1)), Number::Float(-10.0));
        assert_eq!(floor_div_f64(1.0, -0.1), -10.0);
        assert_eq!(floor_div_f64(-1.0, -0.1), 9.0);
        assert_eq!(floor_div_f64(7.5, 2.5), 3.0);
        assert_eq!(floor_div_f64(1.0, f64::INFINITY), 0.0);
        assert_eq!(floor_div_f64(-1.0, f64::INFINITY), -1.0);
        assert!(floor_div_f64(f64::INFINITY, 2.0).is_nan());
    }

    #[test]
    fn floor_division_by_zero_does_not_panic() {
        assert_eq!(
            Number::Int(1).floor_div(Number::Int(0)),
            Number::Float(f64::INFINITY)
        );
        assert!(Number::Int(0).floor_div(Number::Int(0)).as_f64().is_nan());
    }

    #[test]
    fn true_division_is_float() {
        let result = Number::Int(4).true_div(Number::Int(2));
        assert!(!result.is_int());
        assert_eq!(result, Number::Float(2.0));
        assert_eq!(Number::Int(1) / Number::Int(4), Number::Float(0.25));
    }

    #[test]
    fn equality_across_kinds() {
        assert_eq!(Number::Int(1), Number::Float(1.0));
        assert_ne!(Number::Int(1), Number::Float(1.5));
        assert_ne!(Number::Float(f64::NAN), Number::Float(f64::NAN));
        assert_eq!(hash_of(Number::Int(3)), hash_of(Number::Float(3.0)));
        assert_eq!(hash_of(Number::Float(0.0)), hash_of(Number::Float(-0.0)));
    }

    #[test]
    fn ordering() {
        assert!(Number::Int(1) < Number::Float(1.5));
        assert!(Number::Float(-0.5) < Number::Int(0));
    }

    #[test]
    fn display() {
        assert_eq!(Number::Int(4).to_string(), "4");
        assert_eq!(Number::Float(1.0).to_string(), "1.0");
        assert_eq!(Number::Float(0.25).to_string(), "0.25");
        assert_eq!(Number::Float(-0.0).to_string(), "-0.0");
        assert_eq!(Number::Float(0.0001).to_string(), "0.0001");
        assert_eq!(Number::Float(1e15).to_string(), "1000000000000000.0");
    }

    #[test]
    fn display_exponent_and_special_values() {
        assert_eq!(Number::Float(1e20).to_string(), "1e+20");
        assert_eq!(Number::Float(1e16).to_string(), "1e+16");
        assert_eq!(Number::Float(1.5e16).to_string(), "1.5e+16");
        assert_eq!(Number::Float(1e-5).to_string(), "1e-05");
        assert_eq!(Number::Float(-2.5e-7).to_string(), "-2.5e-07");
        assert_eq!(Number::Float(1e100).to_string(), "1e+100");
        assert_eq!(Number::Float(f64::NAN).to_string(), "nan");
        assert_eq!(Number::Float(f64::INFINITY).to_string(), "inf");
        assert_eq!(Number::Float(f64::NEG_INFINITY).to_string(), "-inf");
    }

    #[test]
    fn wide_integers() {
        assert_matches!(Number::from(5usize), Number::Int(5));
        assert_matches!(Number::from(-5isize), Number::Int(-5));
        assert_matches!(Number::from(7u64), Number::Int(7));
        assert_matches!(Number::from(-9i128), Number::Int(-9));
        assert!(!Number::from(u64::MAX).is_int());
        assert_eq!(Number::from(u128::MAX).as_f64(), u128::MAX as f64);
    }

    #[test]
    fn primitive_conversions() {
        assert_eq!(Number::Int(3).to_u64(), Some(3));
        assert_eq!(Number::Int(-3).to_u64(), None);
        assert_eq!(Number::Float(2.75).to_u64(), Some(2));
        assert_eq!(Number::Float(-1.5).to_i64(), Some(-1));
        assert_eq!(Number::Int(4).to_usize(), Some(4));
        assert_eq!(Number::Int(2).to_f64(), Some(2.0));
    }

    #[test]
    fn deserialize_keeps_kind() {
        let numbers: Vec<Number> = serde_json::from_str("[4, 4.0, -2, 0.5]").expect("valid json");
        assert_matches!(numbers[0], Number::Int(4));
        assert!(!numbers[1].is_int());
        assert_matches!(numbers[2], Number::Int(-2));
        assert!(!numbers[3].is_int());
    }
}
