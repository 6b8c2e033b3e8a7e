//! Piece transforms for the renderer.
//!
//! Transforms are only authoritative when no turn is in flight; during a turn
//! the gripped layer is rotated by the eased fraction of its target angle.

use cgmath::{Matrix3, Matrix4, Rad, Vector3, vec3};
use cubesim_core::{Axis, Cubie, CubieSet, Pos};

use crate::animations::ActiveTurn;

fn pos_to_vec(p: Pos) -> Vector3<f32> {
    vec3(f32::from(p.x), f32::from(p.y), f32::from(p.z))
}

/// Returns the unit vector along `axis`.
pub fn axis_vector(axis: Axis) -> Vector3<f32> {
    match axis {
        Axis::X => Vector3::unit_x(),
        Axis::Y => Vector3::unit_y(),
        Axis::Z => Vector3::unit_z(),
    }
}

/// Returns the transform of a cubie at rest.
pub fn cubie_transform(cubie: &Cubie) -> Matrix4<f32> {
    let [a, b, c] = cubie.orientation.columns;
    let rotation = Matrix3::from_cols(pos_to_vec(a), pos_to_vec(b), pos_to_vec(c));
    Matrix4::from_translation(pos_to_vec(cubie.position)) * Matrix4::from(rotation)
}

/// Returns the transform of a cubie rotated by `angle` radians about `axis`
/// through the center of the cube.
pub fn animated_transform(cubie: &Cubie, axis: Axis, angle: f32) -> Matrix4<f32> {
    Matrix4::from_axis_angle(axis_vector(axis), Rad(angle)) * cubie_transform(cubie)
}

/// Returns the transform of every cubie, in the same order as
/// [`CubieSet::cubies()`].
///
/// `current` is the turn in flight, if any, along with its eased progress.
pub fn render_transforms(cubies: &CubieSet, current: Option<(&ActiveTurn, f32)>) -> Vec<Matrix4<f32>> {
    let mut ret: Vec<Matrix4<f32>> = cubies.iter().map(cubie_transform).collect();
    if let Some((active, t)) = current {
        let angle = active.target_angle * t;
        for &i in &active.grip {
            ret[i] = animated_transform(&cubies.cubies()[i], active.axis(), angle);
        }
    }
    ret
}
