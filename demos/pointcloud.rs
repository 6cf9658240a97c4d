//! Batch-transforms a small point cloud and projects it onto a virtual camera.

use lina::{batch, vec3, Mat4f, Quat};
use ndarray::Array2;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // A ring of points around the y-axis, 5 units in front of the camera.
    let points = Array2::from_shape_fn((12, 3), |(i, c)| {
        let angle = i as f32 / 12.0 * std::f32::consts::TAU;
        match c {
            0 => angle.cos(),
            1 => angle.sin(),
            _ => -5.0,
        }
    });

    let model = Mat4f::compose(
        vec3(0.0, 0.5, 0.0),
        Quat::from_rotation_y(0.3),
        vec3(2.0, 2.0, 2.0),
    );
    let world = batch::apply_matrix(points.view(), &model, 1.0);

    let projection = Mat4f::perspective(-1.0, 1.0, -1.0, 1.0, 1.0, 100.0);
    for row in world.rows() {
        let clip = projection * vec3(row[0], row[1], row[2]).extend(1.0);
        let ndc = clip.truncate() / clip.w;
        println!("({:6.3}, {:6.3}) depth {:6.3}", ndc.x, ndc.y, ndc.z);
    }

    Ok(())
}
