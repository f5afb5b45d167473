//! Stage 1: Extracting
//!
//! Unpacks the bundle into the working directory (`<build>/libs`) in place, so
//! the application classes and the vendored library directory land next to
//! the bundle.
//!
//! ## Process
//!
//! 1.  **Check the bundle**: The bundle must exist and be readable. A missing
//!     bundle usually means the packaging step has not run.
//!
//! 2.  **Clear stale libraries**: The vendored library directory left by a
//!     previous run is removed, so archives dropped from the bundle since then
//!     cannot leak onto the analysis classpath.
//!
//! 3.  **Extract**: The extraction tool unpacks every entry.
//!
//! On failure the working directory is in an undefined state and must not be
//! consumed by later stages.

use std::fs;

use log::debug;

use crate::config::PipelineLayout;
use crate::error::{Error, Result};
use crate::phases::ExtractedTree;
use crate::toolchain::ToolOperations;

/// Execute Stage 1: Extract the bundle
pub fn execute(tools: &dyn ToolOperations, layout: &PipelineLayout) -> Result<ExtractedTree> {
    let bundle = layout.bundle_path();
    let bundle_display = bundle.display().to_string();

    if !bundle.is_file() {
        return Err(Error::Extraction {
            bundle: bundle_display,
            message: "bundle does not exist".to_string(),
            hint: Some("Package the application before building its runtime image".to_string()),
        });
    }

    fs::File::open(&bundle).map_err(|e| Error::Extraction {
        bundle: bundle_display.clone(),
        message: format!("cannot open bundle: {}", e),
        hint: None,
    })?;

    let lib_path = layout.lib_path();
    if lib_path.exists() {
        debug!("removing stale library directory {}", lib_path.display());
        fs::remove_dir_all(&lib_path).map_err(|e| Error::Extraction {
            bundle: bundle_display.clone(),
            message: format!(
                "cannot clear stale library directory '{}': {}",
                lib_path.display(),
                e
            ),
            hint: None,
        })?;
    }

    tools.extract(&layout.working_dir, &layout.bundle_name)?;

    Ok(ExtractedTree {
        root: layout.working_dir.clone(),
        lib_dir: layout.lib_dir.clone(),
    })
}
