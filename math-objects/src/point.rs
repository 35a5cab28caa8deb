//! 2d points and their component-wise arithmetic.

use std::any::{type_name, Any};
use std::fmt::{Display, Formatter};

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use crate::error::{MathObjectsError, Result};
use crate::number::Number;

/// A point (or vector) in 2-dimensional space.
///
/// All arithmetic is component-wise and produces a new point. The right-hand operand can be
/// another point or a scalar, see [`Operand`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Hash, Serialize, Deserialize)]
pub struct Point2d {
    x: Number,
    y: Number,
}

impl Point2d {
    /// Creates a new point with the given coordinates.
    pub fn new(x: impl Into<Number>, y: impl Into<Number>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    /// Returns x coordinate of the point.
    pub fn x(&self) -> Number {
        self.x
    }

    /// Returns y coordinate of the point.
    pub fn y(&self) -> Number {
        self.y
    }

    /// Returns coordinates of the point as `(x, y)`.
    pub fn as_pair(&self) -> (Number, Number) {
        (self.x, self.y)
    }

    /// Returns coordinates of the point converted to `f64`.
    pub fn to_f64_pair(&self) -> (f64, f64) {
        (self.x.as_f64(), self.y.as_f64())
    }

    /// Tries to interpret an arbitrary value as a point.
    ///
    /// Accepts [`Point2d`] itself, as well as `(N, N)` tuples and `[N; 2]` arrays of numeric
    /// primitives.
    pub fn from_any<T: Any>(value: &T) -> Option<Point2d> {
        let value = value as &dyn Any;
        if let Some(point) = value.downcast_ref::<Point2d>() {
            return Some(*point);
        }

        macro_rules! try_pairs {
            ($($t:ty),*) => {
                $(
                    if let Some((x, y)) = value.downcast_ref::<($t, $t)>() {
                        return Some(Point2d::new(*x, *y));
                    }
                    if let Some([x, y]) = value.downcast_ref::<[$t; 2]>() {
                        return Some(Point2d::new(*x, *y));
                    }
                )*
            };
        }

        try_pairs!(
            Number, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
        );
        None
    }

    /// Component-wise division rounding toward negative infinity.
    pub fn floor_div(self, rhs: impl Into<Operand>) -> Point2d {
        self.apply(rhs.into(), Operation::FloorDivision)
    }

    /// Component-wise real division. Same as the `/` operator.
    pub fn true_div(self, rhs: impl Into<Operand>) -> Point2d {
        self.apply(rhs.into(), Operation::TrueDivision)
    }

    /// Adds a dynamically typed operand.
    ///
    /// Fails with [`MathObjectsError::UnsupportedOperandType`] if `rhs` is neither a point nor a
    /// numeric scalar.
    pub fn try_add<T: Any>(&self, rhs: &T) -> Result<Point2d> {
        self.try_apply(rhs, Operation::Addition)
    }

    /// Subtracts a dynamically typed operand. See [`Point2d::try_add`].
    pub fn try_sub<T: Any>(&self, rhs: &T) -> Result<Point2d> {
        self.try_apply(rhs, Operation::Subtraction)
    }

    /// Multiplies by a dynamically typed operand. See [`Point2d::try_add`].
    pub fn try_mul<T: Any>(&self, rhs: &T) -> Result<Point2d> {
        self.try_apply(rhs, Operation::Multiplication)
    }

    /// Floor-divides by a dynamically typed operand. See [`Point2d::try_add`].
    pub fn try_floor_div<T: Any>(&self, rhs: &T) -> Result<Point2d> {
        self.try_apply(rhs, Operation::FloorDivision)
    }

    /// Divides by a dynamically typed operand. See [`Point2d::try_add`].
    pub fn try_true_div<T: Any>(&self, rhs: &T) -> Result<Point2d> {
        self.try_apply(rhs, Operation::TrueDivision)
    }

    fn try_apply<T: Any>(&self, rhs: &T, operation: Operation) -> Result<Point2d> {
        let Some(operand) = Operand::from_any(rhs) else {
            log::trace!("{operation} rejected operand of type {}", type_name::<T>());
            return Err(MathObjectsError::UnsupportedOperandType {
                operation,
                type_name: type_name::<T>(),
            });
        };

        Ok(self.apply(operand, operation))
    }

    fn apply(self, rhs: Operand, operation: Operation) -> Point2d {
        match rhs {
            Operand::Scalar(s) => Point2d {
                x: operation.apply(self.x, s),
                y: operation.apply(self.y, s),
            },
            Operand::Point(p) => Point2d {
                x: operation.apply(self.x, p.x),
                y: operation.apply(self.y, p.y),
            },
        }
    }
}

impl Display for Point2d {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl From<(Number, Number)> for Point2d {
    fn from((x, y): (Number, Number)) -> Self {
        Self { x, y }
    }
}

/// Right-hand side of a [`Point2d`] arithmetic operation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Operand {
    /// The same value is applied to both coordinates.
    Scalar(Number),
    /// Coordinates are combined pairwise.
    Point(Point2d),
}

impl Operand {
    /// Classifies a dynamically typed value. Returns `None` for anything that is neither a
    /// [`Point2d`] nor a numeric scalar.
    pub fn from_any<T: Any>(value: &T) -> Option<Operand> {
        let value = value as &dyn Any;
        if let Some(operand) = value.downcast_ref::<Operand>() {
            return Some(*operand);
        }
        if let Some(point) = value.downcast_ref::<Point2d>() {
            return Some(Operand::Point(*point));
        }

        macro_rules! try_scalars {
            ($($t:ty),*) => {
                $(
                    if let Some(v) = value.downcast_ref::<$t>() {
                        return Some(Operand::Scalar(Number::from(*v)));
                    }
                )*
            };
        }

        try_scalars!(
            Number, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
        );
        None
    }
}

impl From<Point2d> for Operand {
    fn from(value: Point2d) -> Self {
        Operand::Point(value)
    }
}

impl From<Number> for Operand {
    fn from(value: Number) -> Self {
        Operand::Scalar(value)
    }
}

macro_rules! impl_scalar_operand {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Operand {
                fn from(value: $t) -> Self {
                    Operand::Scalar(Number::from(value))
                }
            }

            impl std::ops::Mul<Point2d> for $t {
                type Output = Point2d;

                fn mul(self, rhs: Point2d) -> Point2d {
                    rhs * self
                }
            }
        )*
    };
}

impl_scalar_operand!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl std::ops::Mul<Point2d> for Number {
    type Output = Point2d;

    fn mul(self, rhs: Point2d) -> Point2d {
        rhs * self
    }
}

/// Arithmetic operation supported by [`Point2d`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `a + b`
    Addition,
    /// `a - b`
    Subtraction,
    /// `a * b`
    Multiplication,
    /// `a // b`, rounding toward negative infinity.
    FloorDivision,
    /// `a / b`, always real valued.
    TrueDivision,
}

impl Operation {
    fn apply(self, a: Number, b: Number) -> Number {
        match self {
            Operation::Addition => a + b,
            Operation::Subtraction => a - b,
            Operation::Multiplication => a * b,
            Operation::FloorDivision => a.floor_div(b),
            Operation::TrueDivision => a.true_div(b),
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Addition => "Addition",
            Operation::Subtraction => "Subtraction",
            Operation::Multiplication => "Multiplication",
            Operation::FloorDivision => "Floor division",
            Operation::TrueDivision => "Division",
        };
        f.write_str(name)
    }
}

macro_rules! impl_point_op {
    ($trait:ident, $method:ident, $operation:expr) => {
        impl<T: Into<Operand>> std::ops::$trait<T> for Point2d {
            type Output = Point2d;

            fn $method(self, rhs: T) -> Point2d {
                self.apply(rhs.into(), $operation)
            }
        }
    };
}

impl_point_op!(Add, add, Operation::Addition);
impl_point_op!(Sub, sub, Operation::Subtraction);
impl_point_op!(Mul, mul, Operation::Multiplication);
impl_point_op!(Div, div, Operation::TrueDivision);

impl AbsDiffEq for Point2d {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.as_f64().abs_diff_eq(&other.x.as_f64(), epsilon)
            && self.y.as_f64().abs_diff_eq(&other.y.as_f64(), epsilon)
    }
}

impl RelativeEq for Point2d {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.x
            .as_f64()
            .relative_eq(&other.x.as_f64(), epsilon, max_relative)
            && self
                .y
                .as_f64()
                .relative_eq(&other.y.as_f64(), epsilon, max_relative)
    }
}
