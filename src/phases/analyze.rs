//! Stage 2: Analyzing
//!
//! Computes the transitive closure of platform modules the bundle needs. The
//! vendored library archives form the analysis classpath; the bundle itself
//! is the analysis target.
//!
//! References the analyzer cannot resolve are skipped, since vendored
//! archives routinely reference optional platform features absent from this
//! build. Only an unreadable classpath fails the stage.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::config::PipelineLayout;
use crate::error::{Error, Result};
use crate::phases::ExtractedTree;
use crate::toolchain::{AnalysisRequest, ToolOperations};

fn is_archive(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jar"))
}

/// Collect the library archives of an extracted tree, relative to its root
/// and sorted by name.
///
/// A tree without a library directory has an empty classpath.
pub fn collect_classpath(tree: &ExtractedTree) -> Result<Vec<PathBuf>> {
    let lib_path = tree.root.join(&tree.lib_dir);
    if !lib_path.exists() {
        warn!(
            "no library directory at {}; analyzing the bundle alone",
            lib_path.display()
        );
        return Ok(Vec::new());
    }

    let unreadable = |e: std::io::Error| Error::Analysis {
        message: format!(
            "cannot read library directory '{}': {}",
            lib_path.display(),
            e
        ),
        hint: None,
    };

    let mut classpath = Vec::new();
    for entry in fs::read_dir(&lib_path).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let file_type = entry.file_type().map_err(unreadable)?;
        let path = entry.path();
        if file_type.is_file() && is_archive(&path) {
            classpath.push(tree.lib_dir.join(entry.file_name()));
        }
    }
    classpath.sort();

    Ok(classpath)
}

/// Execute Stage 2: Return the analyzer's raw module listing
pub fn execute(
    tools: &dyn ToolOperations,
    tree: &ExtractedTree,
    layout: &PipelineLayout,
) -> Result<String> {
    let classpath = collect_classpath(tree)?;
    debug!("analysis classpath has {} archives", classpath.len());

    let request = AnalysisRequest {
        working_dir: tree.root.clone(),
        bundle_name: layout.bundle_name.clone(),
        classpath,
        release: layout.release.clone(),
    };

    tools.analyze(&request)
}
