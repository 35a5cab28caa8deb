//! This example builds a rectangular mesh from JSON parameters and logs its coordinates.
//!
//! Run it with an optional argument - path to a JSON file with mesh parameters. Without the
//! argument a built-in 4x4 mesh over the `(0,0)-(1,2)` rectangle is used.
//!
//! ```shell
//! cargo run --example mesh_from_json -- ./mesh.json
//! ```

use std::sync::Arc;

use anyhow::Result;
use math_objects::{Matrix, MeshParams, RectangularMesh};

const DEFAULT_PARAMS: &str = r#"{
    "shape": {"x": 4, "y": 4},
    "origin": {"x": 0, "y": 0},
    "sizes": {"x": 1, "y": 2},
    "offset": {"x": 0.5, "y": 0.5}
}"#;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let json = match std::env::args().nth(1) {
        Some(file_name) => std::fs::read_to_string(file_name)?,
        None => DEFAULT_PARAMS.to_string(),
    };

    let params: MeshParams = serde_json::from_str(&json)?;
    let mesh = Arc::new(RectangularMesh::try_from(params)?);

    log::info!("Spacing: {}", mesh.h());
    log::info!("x: {:?}", mesh.x().as_slice());
    log::info!("y: {:?}", mesh.y().as_slice());

    let distance = Matrix::from_mesh_fn(&mesh, |x, y| (x * x + y * y).sqrt());
    for j in 0..distance.nrows() {
        if let Some(row) = distance.row(j) {
            log::info!("distance to origin, row {j}: {:?}", row.as_slice());
        }
    }

    Ok(())
}
