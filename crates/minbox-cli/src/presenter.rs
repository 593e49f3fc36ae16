//! File-backed presentation: a preview sidecar and an STL solid.

use crate::stl::write_stl;
use minbox_kernel::{BodySnapshot, BoxError, BoxPresenter, PreviewStyle};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// Writes previews as JSON sidecars and solids as binary STL.
#[derive(Debug, Clone)]
pub struct FilePresenter {
    /// Where the preview sidecar goes.
    pub preview_path: PathBuf,
    /// Where the solid box goes.
    pub solid_path: PathBuf,
    /// Leave the preview on disk after the run.
    pub keep_preview: bool,
}

/// A preview sidecar on disk. Removed on drop unless kept.
#[derive(Debug)]
pub struct PreviewFile {
    path: PathBuf,
    keep: bool,
}

impl PreviewFile {
    /// Location of the sidecar.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for PreviewFile {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!("failed to remove preview {}: {}", self.path.display(), e);
        }
    }
}

#[derive(Serialize)]
struct PreviewDoc<'a> {
    style: &'a PreviewStyle,
    vertices: Vec<[f64; 3]>,
    triangles: &'a [[u32; 3]],
}

impl BoxPresenter for FilePresenter {
    type Preview = PreviewFile;

    fn show_preview(
        &mut self,
        solid: &BodySnapshot,
        style: &PreviewStyle,
    ) -> minbox_kernel::Result<PreviewFile> {
        let mesh = solid.mesh();
        let doc = PreviewDoc {
            style,
            vertices: mesh.positions().iter().map(|p| [p.x, p.y, p.z]).collect(),
            triangles: mesh.triangles(),
        };
        let json = serde_json::to_string_pretty(&doc)
            .map_err(|e| BoxError::Presenter(format!("encoding preview: {e}")))?;
        std::fs::write(&self.preview_path, json).map_err(|e| {
            BoxError::Presenter(format!("writing {}: {e}", self.preview_path.display()))
        })?;
        info!("preview written to {}", self.preview_path.display());
        Ok(PreviewFile {
            path: self.preview_path.clone(),
            keep: self.keep_preview,
        })
    }

    fn create_solid(&mut self, solid: &BodySnapshot) -> minbox_kernel::Result<()> {
        write_stl(&self.solid_path, solid.mesh()).map_err(|e| {
            BoxError::Presenter(format!("writing {}: {e}", self.solid_path.display()))
        })?;
        info!("solid box written to {}", self.solid_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stl::read_stl;
    use minbox_kernel::{make_box, minimum_bounding_box, present, BoxOptions, MeshKernel};
    use tempfile::TempDir;

    fn presenter_in(dir: &TempDir, keep_preview: bool) -> FilePresenter {
        FilePresenter {
            preview_path: dir.path().join("part.preview.json"),
            solid_path: dir.path().join("part.box.stl"),
            keep_preview,
        }
    }

    fn unit_solid() -> BodySnapshot {
        BodySnapshot::from_mesh(make_box(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_preview_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let mut presenter = presenter_in(&dir, false);
        let preview = presenter
            .show_preview(&unit_solid(), &PreviewStyle::default())
            .unwrap();
        let text = std::fs::read_to_string(preview.path()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["triangles"].as_array().unwrap().len(), 12);
        assert_eq!(doc["style"]["color"][0], 240);
        let path = preview.path().to_path_buf();
        drop(preview);
        assert!(!path.exists());
    }

    #[test]
    fn test_kept_preview_survives() {
        let dir = tempfile::tempdir().unwrap();
        let mut presenter = presenter_in(&dir, true);
        drop(
            presenter
                .show_preview(&unit_solid(), &PreviewStyle::default())
                .unwrap(),
        );
        assert!(presenter.preview_path.exists());
    }

    #[test]
    fn test_solid_written_through_present() {
        let dir = tempfile::tempdir().unwrap();
        let mut presenter = presenter_in(&dir, false);
        let opts = BoxOptions {
            create_solid: true,
            ..Default::default()
        };
        let body = make_box(3.0, 2.0, 1.0);
        let result = minimum_bounding_box(&MeshKernel, &body, &opts).unwrap();
        let preview = present(&MeshKernel, &mut presenter, &result, &opts).unwrap();
        assert!(preview.is_none());
        assert!(!presenter.preview_path.exists());
        let back = read_stl(&presenter.solid_path).unwrap();
        assert_eq!(back.num_triangles(), 12);
        assert!((back.aabb().length() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_unwritable_solid_is_presenter_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut presenter = presenter_in(&dir, false);
        presenter.solid_path = dir.path().join("missing").join("box.stl");
        let err = presenter.create_solid(&unit_solid()).unwrap_err();
        assert!(matches!(err, BoxError::Presenter(_)));
    }
}
