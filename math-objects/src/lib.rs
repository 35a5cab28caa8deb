//! Evenly spaced rectangular point meshes and the 2d point arithmetic used to describe them.
//!
//! * [`Point2d`] - component-wise arithmetic against other points and scalars.
//! * [`RectangularMesh`] - coordinates of a dense rectangular grid of points.
//! * [`Tensor`] - arrays that carry a reference to the mesh they were sampled on.

pub mod error;
pub mod mesh;
pub mod number;
pub mod point;
pub mod sampling;
pub mod tensor;

pub use error::{MathObjectsError, Result};
pub use mesh::{MeshBuilder, MeshParams, RectangularMesh};
pub use number::Number;
pub use point::{Operand, Operation, Point2d};
pub use tensor::{Matrix, Tensor, Vector};

pub use nalgebra;
