//! Stage 4: Linking
//!
//! Hands the filtered module set to the image linker, which writes a runtime
//! image stripped of debug information, header files and man pages.
//!
//! The image directory must not exist when linking starts; the orchestrator
//! deletes any stale image beforehand. If linking fails, whatever the linker
//! managed to write is removed again, so a failed run never leaves a
//! finished-looking image behind.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::config::PipelineLayout;
use crate::error::{Error, Result};
use crate::modules::ModuleSet;
use crate::phases::RuntimeImage;
use crate::toolchain::{LinkRequest, ToolOperations};

/// Delete a stale image left by a previous run.
pub fn remove_stale_image(image: &Path) -> Result<()> {
    if image.exists() {
        debug!("removing stale image {}", image.display());
        fs::remove_dir_all(image).map_err(|e| Error::Link {
            message: format!("cannot remove stale image '{}': {}", image.display(), e),
            hint: None,
        })?;
    }
    Ok(())
}

fn discard_partial_image(image: &Path) {
    if image.exists() {
        if let Err(e) = fs::remove_dir_all(image) {
            warn!(
                "failed to remove partial image {}: {}",
                image.display(),
                e
            );
        }
    }
}

/// Execute Stage 4: Link the runtime image
pub fn execute(
    tools: &dyn ToolOperations,
    modules: &ModuleSet,
    layout: &PipelineLayout,
) -> Result<RuntimeImage> {
    if modules.is_empty() {
        return Err(Error::Link {
            message: "no modules to link".to_string(),
            hint: Some("every module was removed by the exclusion rules".to_string()),
        });
    }

    let image: PathBuf = layout.image_path();
    if image.exists() {
        return Err(Error::link(format!(
            "output directory '{}' already exists",
            image.display()
        )));
    }

    let request = LinkRequest {
        working_dir: layout.working_dir.clone(),
        modules: modules.clone(),
        output: PathBuf::from(&layout.image_name),
        compress: layout.compress.clone(),
    };

    if let Err(e) = tools.link(&request) {
        discard_partial_image(&image);
        return Err(e);
    }

    if !image.is_dir() {
        return Err(Error::link(format!(
            "linker reported success but '{}' was not created",
            image.display()
        )));
    }

    Ok(RuntimeImage {
        path: image,
        modules: modules.clone(),
    })
}
