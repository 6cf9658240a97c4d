//! Composes a transform from its components, then recovers them via `decompose`.

use lina::{vec3, Mat4f, Quat};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let translation = vec3(2.0, 2.0, 2.0);
    let rotation = Quat::from_rotation_z(std::f32::consts::TAU / 4.0);
    let scaling = vec3(1.0, 2.0, 1.0);

    let mat = Mat4f::compose(translation, rotation, scaling);
    println!("composed: {mat:#?}");

    let (t, r, s) = mat.decompose();
    println!("translation: {t}");
    println!("rotation:    {r:?}");
    println!("scaling:     {s}");

    let p = vec3(1.0, 0.0, 0.0);
    println!("{p} maps to {}", mat.transform_point(p));

    Ok(())
}
