#![warn(missing_docs)]

//! Principal-axis oriented bounding boxes for solid bodies.
//!
//! The box orientation comes from the body's principal axes of inertia:
//! a good, cheap heuristic for a tight box, not a global minimum search.
//!
//! # Example
//!
//! ```
//! use minbox_kernel::{make_box, minimum_bounding_box, BoxOptions, MeshKernel};
//!
//! let body = make_box(3.0, 2.0, 1.0);
//! let result = minimum_bounding_box(&MeshKernel, &body, &BoxOptions::default()).unwrap();
//! assert!((result.length - 3.0).abs() < 1e-9);
//! assert!((result.width - 2.0).abs() < 1e-9);
//! assert!((result.height - 1.0).abs() < 1e-9);
//! ```

pub use minbox_math;

pub mod align;
pub mod bbox;
pub mod body;
pub mod error;
pub mod mass;
pub mod mesh;
pub mod minimum_box;
pub mod obb;
pub mod present;
pub mod primitives;
pub mod provider;

pub use align::align_coordinate_systems;
pub use bbox::{transformed_bounding_box, Aabb3};
pub use body::BodySnapshot;
pub use error::{BoxError, Result};
pub use mass::{physical_properties, CalculationAccuracy, PhysicalProperties};
pub use mesh::SolidMesh;
pub use minimum_box::{minimum_bounding_box, place_box, BoxOptions, MinimumBox};
pub use obb::{place_in_world, OrientedBox};
pub use present::{present, BoxPresenter, PreviewStyle};
pub use primitives::{make_box, make_centered_box, make_cylinder};
pub use provider::{GeometryProvider, MeshKernel};
