//! Arrays that remember the mesh they were sampled on.

use std::ops::Deref;
use std::sync::Arc;

use nalgebra::{DMatrix, DVector};

use crate::mesh::RectangularMesh;
use crate::number::floor_div_f64;

/// Numeric array paired with an optional reference to the [`RectangularMesh`] it belongs to.
///
/// The mesh is metadata only: it never takes part in the arithmetic. Arithmetic is element-wise
/// and the result carries the mesh of the left operand, or the mesh of the right operand if the
/// left one has none. Views ([`Vector::segment`], [`Matrix::row`], [`Matrix::column`]) keep the
/// mesh of the array they were taken from.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<A> {
    data: A,
    mesh: Option<Arc<RectangularMesh>>,
}

/// One-dimensional [`Tensor`].
pub type Vector = Tensor<DVector<f64>>;

/// Two-dimensional [`Tensor`].
pub type Matrix = Tensor<DMatrix<f64>>;

impl<A> Tensor<A> {
    /// Wraps the data. The new tensor is not attached to any mesh.
    pub fn new(data: A) -> Self {
        Self { data, mesh: None }
    }

    /// Attaches the tensor to the mesh.
    pub fn with_mesh(mut self, mesh: Arc<RectangularMesh>) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Mesh the tensor is attached to, if any.
    pub fn mesh(&self) -> Option<&Arc<RectangularMesh>> {
        self.mesh.as_ref()
    }

    /// Replaces the mesh reference.
    pub fn set_mesh(&mut self, mesh: Option<Arc<RectangularMesh>>) {
        self.mesh = mesh;
    }

    /// Detaches the tensor from its mesh, returning the mesh.
    pub fn take_mesh(&mut self) -> Option<Arc<RectangularMesh>> {
        self.mesh.take()
    }

    /// Underlying array.
    pub fn data(&self) -> &A {
        &self.data
    }

    /// Consumes the tensor and returns the underlying array.
    pub fn into_data(self) -> A {
        self.data
    }

    fn derive<B>(&self, data: B) -> Tensor<B> {
        Tensor {
            data,
            mesh: self.mesh.clone(),
        }
    }

    fn derive_with<B>(&self, other: &Tensor<A>, data: B) -> Tensor<B> {
        Tensor {
            data,
            mesh: self.mesh.clone().or_else(|| other.mesh.clone()),
        }
    }
}

impl<A> Deref for Tensor<A> {
    type Target = A;

    fn deref(&self) -> &A {
        &self.data
    }
}

impl<A> From<A> for Tensor<A> {
    fn from(data: A) -> Self {
        Self::new(data)
    }
}

impl Vector {
    /// Creates a vector of `len` zeros.
    pub fn zeros(len: usize) -> Self {
        Self::new(DVector::zeros(len))
    }

    /// Returns a copy of `len` elements starting at `start`.
    pub fn segment(&self, start: usize, len: usize) -> Option<Vector> {
        if start.checked_add(len)? > self.data.len() {
            return None;
        }

        Some(self.derive(self.data.rows(start, len).into_owned()))
    }
}

impl Matrix {
    /// Creates a matrix of zeros.
    pub fn zeros(rows: usize, columns: usize) -> Self {
        Self::new(DMatrix::zeros(rows, columns))
    }

    /// Creates a matrix of zeros with one element per mesh point, attached to the mesh.
    pub fn zeros_on(mesh: &Arc<RectangularMesh>) -> Self {
        let (rows, columns) = mesh.dimensions();
        Self::zeros(rows, columns).with_mesh(mesh.clone())
    }

    /// Evaluates `f(x, y)` at every mesh point.
    pub fn from_mesh_fn(mesh: &Arc<RectangularMesh>, f: impl Fn(f64, f64) -> f64) -> Self {
        let (xv, yv) = mesh.as_arrays();
        Self::new(xv.zip_map(yv, f)).with_mesh(mesh.clone())
    }

    /// Returns a copy of the row `j`.
    pub fn row(&self, j: usize) -> Option<Vector> {
        (j < self.data.nrows()).then(|| self.derive(self.data.row(j).transpose()))
    }

    /// Returns a copy of the column `i`.
    pub fn column(&self, i: usize) -> Option<Vector> {
        (i < self.data.ncols()).then(|| self.derive(self.data.column(i).into_owned()))
    }
}

macro_rules! impl_tensor_ops {
    ($data:ty) => {
        impl Tensor<$data> {
            /// Element-wise division rounding toward negative infinity.
            ///
            /// Panics if the shapes differ.
            pub fn floor_div(&self, rhs: &Tensor<$data>) -> Tensor<$data> {
                self.derive_with(rhs, self.data.zip_map(&rhs.data, floor_div_f64))
            }

            /// Divides every element by `rhs`, rounding toward negative infinity.
            pub fn floor_div_scalar(&self, rhs: f64) -> Tensor<$data> {
                self.derive(self.data.map(|a| floor_div_f64(a, rhs)))
            }
        }

        impl std::ops::Add<&Tensor<$data>> for &Tensor<$data> {
            type Output = Tensor<$data>;

            fn add(self, rhs: &Tensor<$data>) -> Tensor<$data> {
                self.derive_with(rhs, &self.data + &rhs.data)
            }
        }

        impl std::ops::Sub<&Tensor<$data>> for &Tensor<$data> {
            type Output = Tensor<$data>;

            fn sub(self, rhs: &Tensor<$data>) -> Tensor<$data> {
                self.derive_with(rhs, &self.data - &rhs.data)
            }
        }

        impl std::ops::Mul<&Tensor<$data>> for &Tensor<$data> {
            type Output = Tensor<$data>;

            fn mul(self, rhs: &Tensor<$data>) -> Tensor<$data> {
                self.derive_with(rhs, self.data.component_mul(&rhs.data))
            }
        }

        impl std::ops::Div<&Tensor<$data>> for &Tensor<$data> {
            type Output = Tensor<$data>;

            fn div(self, rhs: &Tensor<$data>) -> Tensor<$data> {
                self.derive_with(rhs, self.data.component_div(&rhs.data))
            }
        }

        impl std::ops::Add<f64> for &Tensor<$data> {
            type Output = Tensor<$data>;

            fn add(self, rhs: f64) -> Tensor<$data> {
                self.derive(self.data.add_scalar(rhs))
            }
        }

        impl std::ops::Sub<f64> for &Tensor<$data> {
            type Output = Tensor<$data>;

            fn sub(self, rhs: f64) -> Tensor<$data> {
                self.derive(self.data.add_scalar(-rhs))
            }
        }

        impl std::ops::Mul<f64> for &Tensor<$data> {
            type Output = Tensor<$data>;

            fn mul(self, rhs: f64) -> Tensor<$data> {
                self.derive(&self.data * rhs)
            }
        }

        impl std::ops::Div<f64> for &Tensor<$data> {
            type Output = Tensor<$data>;

            fn div(self, rhs: f64) -> Tensor<$data> {
                self.derive(&self.data / rhs)
            }
        }
    };
}

impl_tensor_ops!(DVector<f64>);
impl_tensor_ops!(DMatrix<f64>);

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::point::Point2d;

    fn test_mesh() -> Arc<RectangularMesh> {
        let mesh = RectangularMesh::new(
            Point2d::new(3, 2),
            Point2d::new(0, 0),
            Point2d::new(3, 2),
            Point2d::default(),
        )
        .expect("valid mesh");
        Arc::new(mesh)
    }

    #[test]
    fn mesh_is_absent_by_default() {
        let vector = Vector::zeros(3);
        assert!(vector.mesh().is_none());
        assert_eq!(vector.len(), 3);

        let matrix = Matrix::from(DMatrix::from_element(2, 2, 1.0));
        assert!(matrix.mesh().is_none());
    }

    #[test]
    fn matrix_on_mesh() {
        let mesh = test_mesh();
        let zeros = Matrix::zeros_on(&mesh);
        assert_eq!(zeros.shape(), (2, 3));
        assert!(Arc::ptr_eq(zeros.mesh().expect("attached"), &mesh));

        let field = Matrix::from_mesh_fn(&mesh, |x, y| x + 10.0 * y);
        assert_abs_diff_eq!(field[(1, 2)], 12.0);
        assert_abs_diff_eq!(field[(0, 1)], 1.0);
    }

    #[test]
    fn arithmetic_propagates_mesh() {
        let mesh = test_mesh();
        let tagged = Matrix::from_mesh_fn(&mesh, |x, _| x);
        let plain = Matrix::new(DMatrix::from_element(2, 3, 2.0));

        let sum = &tagged + &plain;
        assert!(Arc::ptr_eq(sum.mesh().expect("left mesh"), &mesh));
        assert_abs_diff_eq!(sum[(0, 2)], 4.0);

        let product = &plain * &tagged;
        assert!(Arc::ptr_eq(product.mesh().expect("right mesh"), &mesh));
        assert_abs_diff_eq!(product[(1, 1)], 2.0);

        let untagged = &plain - &plain;
        assert!(untagged.mesh().is_none());
    }

    #[test]
    fn left_mesh_wins() {
        let left = test_mesh();
        let right = test_mesh();
        let a = Matrix::zeros_on(&left);
        let b = Matrix::zeros_on(&right);

        let sum = &a + &b;
        assert!(Arc::ptr_eq(sum.mesh().expect("mesh"), &left));
    }

    #[test]
    fn scalar_arithmetic() {
        let mesh = test_mesh();
        let field = Matrix::from_mesh_fn(&mesh, |x, y| x + y);

        let scaled = &(&field * 2.0) + 1.0;
        assert!(scaled.mesh().is_some());
        assert_abs_diff_eq!(scaled[(1, 2)], 7.0);

        let divided = &field / 2.0;
        assert_abs_diff_eq!(divided[(1, 1)], 1.0);

        let shifted = &field - 0.5;
        assert_abs_diff_eq!(shifted[(0, 0)], -0.5);
    }

    #[test]
    fn element_wise_division() {
        let a = Vector::new(DVector::from_vec(vec![5.0, -5.0, 3.0]));
        let b = Vector::new(DVector::from_vec(vec![2.0, 2.0, 4.0]));

        assert_eq!(
            a.floor_div(&b).into_data(),
            DVector::from_vec(vec![2.0, -3.0, 0.0])
        );
        assert_eq!(
            (&a / &b).into_data(),
            DVector::from_vec(vec![2.5, -2.5, 0.75])
        );
        assert_eq!(
            a.floor_div_scalar(2.0).into_data(),
            DVector::from_vec(vec![2.0, -3.0, 1.0])
        );
    }

    #[test]
    fn floor_division_uses_exact_quotient() {
        let a = Vector::new(DVector::from_vec(vec![1.0, -1.0]));
        let b = Vector::new(DVector::from_vec(vec![0.1, 0.1]));

        assert_eq!(
            a.floor_div(&b).into_data(),
            DVector::from_vec(vec![9.0, -10.0])
        );
        assert_eq!(
            a.floor_div_scalar(0.1).into_data(),
            DVector::from_vec(vec![9.0, -10.0])
        );
    }

    #[test]
    fn views_keep_mesh() {
        let mesh = test_mesh();
        let field = Matrix::from_mesh_fn(&mesh, |x, y| x + 10.0 * y);

        let row = field.row(1).expect("row in range");
        assert!(row.mesh().is_some());
        assert_eq!(row.into_data(), DVector::from_vec(vec![10.0, 11.0, 12.0]));

        let column = field.column(2).expect("column in range");
        assert!(column.mesh().is_some());
        assert_eq!(column.data(), &DVector::from_vec(vec![2.0, 12.0]));

        let segment = column.segment(1, 1).expect("segment in range");
        assert!(segment.mesh().is_some());
        assert_eq!(segment[0], 12.0);

        assert!(field.row(2).is_none());
        assert!(field.column(3).is_none());
        assert!(column.segment(1, 2).is_none());
        assert!(column.segment(usize::MAX, 2).is_none());
    }

    #[test]
    fn detach_mesh() {
        let mesh = test_mesh();
        let mut field = Matrix::zeros_on(&mesh);
        assert!(field.take_mesh().is_some());
        assert!(field.mesh().is_none());

        field.set_mesh(Some(mesh.clone()));
        assert!(field.mesh().is_some());
    }
}
