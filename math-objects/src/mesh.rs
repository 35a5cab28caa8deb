//! Evenly spaced rectangular point meshes.

use std::any::{type_name, Any};

use nalgebra::{DMatrix, DVector};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{MathObjectsError, Result};
use crate::number::Number;
use crate::point::Point2d;
use crate::sampling::{cell_starts, meshgrid};

/// A collection of points, evenly spaced along each axis, that span a set of rectangular cells
/// covering a rectangle in 2-dimensional space.
///
/// Every point sits at the same relative position inside its cell, given by the `offset`
/// parameter:
/// * `(0, 0)` - bottom-left corner of the cell (default),
/// * `(0.5, 0.5)` - center of the cell,
/// * `(1, 0.5)` - middle of the right edge of the cell.
///
/// All coordinates are computed when the mesh is created and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangularMesh {
    shape: Point2d,
    origin: Point2d,
    sizes: Point2d,
    offset: Point2d,
    h: Point2d,
    x: DVector<f64>,
    y: DVector<f64>,
    xv: DMatrix<f64>,
    yv: DMatrix<f64>,
}

impl RectangularMesh {
    /// Creates a new mesh.
    ///
    /// * `shape` - number of points along the x and y axis, must be positive integers.
    /// * `origin` - coordinates of the bottom-left corner of the rectangle.
    /// * `sizes` - width and height of the rectangle.
    /// * `offset` - position of the points inside their cells, each coordinate in `[0, 1]`.
    ///
    /// For example, `RectangularMesh::new(Point2d::new(4, 4), Point2d::new(0, 1),
    /// Point2d::new(1, 1), Point2d::default())` represents the rectangle with the bottom-left
    /// corner at `(0,1)` and the upper-right corner at `(1,2)`, with 4 points evenly spaced
    /// along each axis.
    pub fn new(shape: Point2d, origin: Point2d, sizes: Point2d, offset: Point2d) -> Result<Self> {
        let (columns, rows) = validate_shape(shape)?;

        let h = sizes / shape;
        let actual_offset = h * offset;
        let new_origin = origin + actual_offset;

        let (start_x, start_y) = new_origin.to_f64_pair();
        let (width, height) = sizes.to_f64_pair();
        let x = cell_starts(start_x, width, columns);
        let y = cell_starts(start_y, height, rows);
        let (xv, yv) = meshgrid(&x, &y);

        log::debug!("Created rectangular mesh: shape {shape}, origin {origin}, sizes {sizes}, offset {offset}, h {h}");

        Ok(Self {
            shape,
            origin,
            sizes,
            offset,
            h,
            x,
            y,
            xv,
            yv,
        })
    }

    /// Returns a builder that accepts parameters of any type and validates them on
    /// [`MeshBuilder::build`].
    pub fn builder() -> MeshBuilder {
        MeshBuilder::default()
    }

    /// Number of points along the x and y axis.
    pub fn shape(&self) -> Point2d {
        self.shape
    }

    /// Bottom-left corner of the rectangle, before the offset is applied.
    pub fn origin(&self) -> Point2d {
        self.origin
    }

    /// Width and height of the rectangle.
    pub fn sizes(&self) -> Point2d {
        self.sizes
    }

    /// Relative position of the points inside their cells.
    pub fn offset(&self) -> Point2d {
        self.offset
    }

    /// Distance between neighbouring points along each axis.
    pub fn h(&self) -> Point2d {
        self.h
    }

    /// X coordinates of the mesh columns.
    pub fn x(&self) -> &DVector<f64> {
        &self.x
    }

    /// Y coordinates of the mesh rows.
    pub fn y(&self) -> &DVector<f64> {
        &self.y
    }

    /// Returns two matrices with the x and y coordinates of every mesh point.
    ///
    /// Both have `shape.y` rows and `shape.x` columns.
    pub fn as_arrays(&self) -> (&DMatrix<f64>, &DMatrix<f64>) {
        (&self.xv, &self.yv)
    }

    /// Returns `(rows, columns)` of the coordinate matrices.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.y.len(), self.x.len())
    }

    /// Total number of mesh points.
    pub fn point_count(&self) -> usize {
        self.x.len() * self.y.len()
    }

    /// Returns the mesh point in column `i` and row `j`.
    pub fn point(&self, i: usize, j: usize) -> Option<Point2d> {
        Some(Point2d::new(*self.x.get(i)?, *self.y.get(j)?))
    }

    /// Iterates over all mesh points, row by row.
    pub fn iter_points(&self) -> impl Iterator<Item = Point2d> + '_ {
        self.y
            .iter()
            .flat_map(move |&y| self.x.iter().map(move |&x| Point2d::new(x, y)))
    }

    /// Returns the bottom-left and the upper-right corners of the meshed rectangle.
    pub fn bounds(&self) -> (Point2d, Point2d) {
        (self.origin, self.origin + self.sizes)
    }

    /// Returns parameters the mesh was created with.
    pub fn params(&self) -> MeshParams {
        MeshParams {
            shape: self.shape,
            origin: self.origin,
            sizes: self.sizes,
            offset: self.offset,
        }
    }
}

fn validate_shape(shape: Point2d) -> Result<(usize, usize)> {
    let count = |n: Number| n.as_int().filter(|v| *v > 0).and_then(|v| v.to_usize());
    match (count(shape.x()), count(shape.y())) {
        (Some(columns), Some(rows)) => Ok((columns, rows)),
        _ => Err(MathObjectsError::InvalidShape(shape)),
    }
}

/// Serializable set of parameters of a [`RectangularMesh`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshParams {
    /// Number of points along each axis.
    pub shape: Point2d,
    /// Bottom-left corner of the rectangle.
    pub origin: Point2d,
    /// Width and height of the rectangle.
    pub sizes: Point2d,
    /// Position of the points inside their cells. Defaults to `(0,0)`.
    #[serde(default)]
    pub offset: Point2d,
}

impl TryFrom<MeshParams> for RectangularMesh {
    type Error = MathObjectsError;

    fn try_from(params: MeshParams) -> Result<Self> {
        Self::new(params.shape, params.origin, params.sizes, params.offset)
    }
}

type Parameter = std::result::Result<Point2d, &'static str>;

fn parameter<T: Any>(value: &T) -> Parameter {
    Point2d::from_any(value).ok_or(type_name::<T>())
}

fn resolve(name: &'static str, parameter: Option<Parameter>) -> Result<Point2d> {
    match parameter {
        Some(Ok(point)) => Ok(point),
        Some(Err(type_name)) => Err(MathObjectsError::InvalidParameterType {
            parameter: name,
            type_name,
        }),
        None => Err(MathObjectsError::MissingParameter(name)),
    }
}

/// Convenience type to create a [`RectangularMesh`] from dynamically typed parameters.
///
/// Each parameter can be a [`Point2d`], a `(N, N)` tuple or a `[N; 2]` array of numeric
/// primitives. Anything else makes [`MeshBuilder::build`] fail with
/// [`MathObjectsError::InvalidParameterType`].
#[derive(Debug, Default)]
pub struct MeshBuilder {
    shape: Option<Parameter>,
    origin: Option<Parameter>,
    sizes: Option<Parameter>,
    offset: Option<Parameter>,
}

impl MeshBuilder {
    /// Sets number of points along the x and y axis. Required.
    pub fn with_shape<T: Any>(mut self, shape: T) -> Self {
        self.shape = Some(parameter(&shape));
        self
    }

    /// Sets the bottom-left corner of the rectangle. Required.
    pub fn with_origin<T: Any>(mut self, origin: T) -> Self {
        self.origin = Some(parameter(&origin));
        self
    }

    /// Sets width and height of the rectangle. Required.
    pub fn with_sizes<T: Any>(mut self, sizes: T) -> Self {
        self.sizes = Some(parameter(&sizes));
        self
    }

    /// Sets position of the points inside their cells.
    ///
    /// Defaults to `(0,0)`.
    pub fn with_offset<T: Any>(mut self, offset: T) -> Self {
        self.offset = Some(parameter(&offset));
        self
    }

    /// Consumes the builder and creates the mesh.
    pub fn build(self) -> Result<RectangularMesh> {
        let MeshBuilder {
            shape,
            origin,
            sizes,
            offset,
        } = self;

        let shape = resolve("shape", shape)?;
        let origin = resolve("origin", origin)?;
        let sizes = resolve("sizes", sizes)?;
        let offset = match offset {
            Some(offset) => resolve("offset", Some(offset))?,
            None => Point2d::default(),
        };

        RectangularMesh::new(shape, origin, sizes, offset)
    }
}
