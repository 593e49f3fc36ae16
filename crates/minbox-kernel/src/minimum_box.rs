//! The end-to-end principal-axis bounding box.
//!
//! 1. Mass properties give the center of mass and principal axes.
//! 2. A copy of the body is turned so the principal axes line up with
//!    the world axes, pivoting on the center of mass.
//! 3. The copy's plain min/max box is taken in that rotated space.
//! 4. The box is built against the world axes, then turned back onto
//!    the principal frame.
//!
//! The orientation is a heuristic, not a search: no other candidate
//! orientations are tried.

use crate::align::align_coordinate_systems;
use crate::body::BodySnapshot;
use crate::error::Result;
use crate::mass::CalculationAccuracy;
use crate::mesh::SolidMesh;
use crate::obb::{place_in_world, OrientedBox};
use crate::present::PreviewStyle;
use crate::provider::GeometryProvider;
use minbox_math::{Frame, Point3, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Options for one bounding-box request.
///
/// Both presentation flags default to off; a headless caller only gets
/// numbers back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxOptions {
    /// Mass-property accuracy tier.
    pub accuracy: CalculationAccuracy,
    /// Show a transient translucent box.
    pub show_preview: bool,
    /// Create a persistent solid box.
    pub create_solid: bool,
    /// Look of the transient box.
    pub preview_style: PreviewStyle,
}

/// Result of [`minimum_bounding_box`].
#[derive(Debug, Clone, PartialEq)]
pub struct MinimumBox {
    /// Extent along `x_axis`.
    pub length: f64,
    /// Extent along `y_axis`.
    pub width: f64,
    /// Extent along `z_axis`.
    pub height: f64,
    /// First principal axis.
    pub x_axis: Vec3,
    /// Second principal axis.
    pub y_axis: Vec3,
    /// Third principal axis.
    pub z_axis: Vec3,
    /// Center of mass of the body.
    pub center_of_mass: Point3,
    /// Volume of the body.
    pub volume: f64,
    /// The box in world space.
    pub oriented_box: OrientedBox,
    /// Principal frame at the center of mass.
    pub principal_frame: Frame,
    /// The box as measured in the rotated copy's space, before it was
    /// turned back onto the principal frame.
    pub local_box: OrientedBox,
}

/// Compute the principal-axis oriented bounding box of `body`.
///
/// `body` is only read; all movement happens on a snapshot that is
/// dropped before returning, on success and on error alike.
pub fn minimum_bounding_box<P>(
    provider: &P,
    body: &SolidMesh,
    options: &BoxOptions,
) -> Result<MinimumBox>
where
    P: GeometryProvider + ?Sized,
{
    let props = provider.physical_properties(body, options.accuracy)?;
    let com = props.center_of_mass;
    let principal = props.principal_frame();
    let reference = Frame::world().at(com);

    let to_reference = align_coordinate_systems(&principal, &reference)?;
    debug!(?to_reference, "principal -> reference transform");

    let aabb = {
        let mut snapshot = provider.snapshot(body)?;
        provider.transformed_bounds(&mut snapshot, &to_reference)?
    };

    let local_box = OrientedBox::from_aabb(&aabb, &reference);
    let oriented_box = place_in_world(&local_box, &reference, &principal)?;

    info!(
        length = local_box.length,
        width = local_box.width,
        height = local_box.height,
        "principal-axis bounding box"
    );

    Ok(MinimumBox {
        length: local_box.length,
        width: local_box.width,
        height: local_box.height,
        x_axis: principal.x,
        y_axis: principal.y,
        z_axis: principal.z,
        center_of_mass: com,
        volume: props.volume,
        oriented_box,
        principal_frame: principal,
        local_box,
    })
}

/// Build the world-space solid for `result`: a box in the rotated space,
/// turned back onto the principal frame.
pub fn place_box<P>(provider: &P, result: &MinimumBox) -> Result<BodySnapshot>
where
    P: GeometryProvider + ?Sized,
{
    let mut solid = provider.create_box(&result.local_box)?;
    let back = align_coordinate_systems(
        &Frame::world().at(result.center_of_mass),
        &result.principal_frame,
    )?;
    provider.transform(&mut solid, &back);
    Ok(solid)
}
