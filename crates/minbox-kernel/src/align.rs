//! Rigid transforms that carry one coordinate frame onto another.

use crate::error::{BoxError, Result};
use minbox_math::{Frame, Tolerance, Transform};

/// Build the rigid transform mapping `from` onto `to`.
///
/// The result sends `from.origin` to `to.origin` and each `from` axis to
/// the matching `to` axis: rotation `R = [to axes] * [from axes]^T`,
/// translation `to.origin - R * from.origin`.
///
/// Both frames must be orthonormal; otherwise [`BoxError::Transform`].
/// Mixed handedness between the frames produces a reflection, which is
/// also rejected.
pub fn align_coordinate_systems(from: &Frame, to: &Frame) -> Result<Transform> {
    let tol = Tolerance::DEFAULT.linear;
    for (name, frame) in [("source", from), ("destination", to)] {
        if !frame.is_orthonormal(tol) {
            return Err(BoxError::Transform(format!(
                "{name} frame axes are not orthonormal"
            )));
        }
    }

    let rotation = to.axes_matrix() * from.axes_matrix().transpose();
    let translation = to.origin.coords - rotation * from.origin.coords;
    let t = Transform::from_parts(&rotation, &translation);
    if !t.is_rigid(tol) {
        return Err(BoxError::Transform(
            "frames differ in handedness; alignment would reflect".into(),
        ));
    }
    Ok(t)
}
