//! Hand-off to whoever draws or keeps the box.
//!
//! The kernel never renders anything. A [`BoxPresenter`] receives the
//! placed box solid and decides what a preview or a persistent solid
//! means for its host.

use crate::body::BodySnapshot;
use crate::error::Result;
use crate::minimum_box::{place_box, BoxOptions, MinimumBox};
use crate::provider::GeometryProvider;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Look of a transient preview box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewStyle {
    /// RGBA color.
    pub color: [u8; 4],
    /// Overall opacity in `0.0..=1.0`.
    pub opacity: f32,
}

impl Default for PreviewStyle {
    fn default() -> Self {
        Self {
            color: [240, 150, 50, 255],
            opacity: 0.4,
        }
    }
}

/// Draws or stores a placed box.
pub trait BoxPresenter {
    /// Handle to a shown preview. Dropping it must take the preview down.
    type Preview;

    /// Show `solid` as a transient preview.
    fn show_preview(&mut self, solid: &BodySnapshot, style: &PreviewStyle) -> Result<Self::Preview>;

    /// Keep `solid` as a persistent body.
    fn create_solid(&mut self, solid: &BodySnapshot) -> Result<()>;
}

/// Place the box for `result` and hand it to `presenter` as `options` ask.
///
/// Returns the preview handle when one was shown. If creating the solid
/// fails after the preview is up, the preview is dropped before the error
/// is returned.
pub fn present<P, B>(
    provider: &P,
    presenter: &mut B,
    result: &MinimumBox,
    options: &BoxOptions,
) -> Result<Option<B::Preview>>
where
    P: GeometryProvider + ?Sized,
    B: BoxPresenter + ?Sized,
{
    if !options.show_preview && !options.create_solid {
        return Ok(None);
    }
    let solid = place_box(provider, result)?;

    let preview = if options.show_preview {
        debug!("showing preview");
        Some(presenter.show_preview(&solid, &options.preview_style)?)
    } else {
        None
    };
    if options.create_solid {
        debug!("creating solid");
        presenter.create_solid(&solid)?;
    }
    Ok(preview)
}
