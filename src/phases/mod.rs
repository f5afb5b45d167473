//! Implementation of the 4 stages of the runtime image pipeline.
//!
//! ## Overview
//!
//! Building an image follows 4 stages, sequenced by the [`orchestrator`]:
//! 1. Extracting - Unpack the bundle into its working directory
//! 2. Analyzing - Compute the platform modules the bundle needs
//! 3. Filtering - Drop modules that belong to the build toolchain
//! 4. Linking - Assemble a stripped runtime image from the remaining modules
//!
//! Each stage consumes only the previous stage's output. The first failure
//! ends the run; the remaining stages are skipped.

use std::fmt;
use std::path::PathBuf;

use crate::error::Error;
use crate::modules::ModuleSet;

// Stage modules
pub mod analyze;
pub mod extract;
#[cfg(test)]
pub(crate) mod fake_tools;
pub mod filter;
pub mod link;
pub mod orchestrator;

pub use orchestrator::Pipeline;

/// A stage of the pipeline, used to attribute failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extracting,
    Analyzing,
    Filtering,
    Linking,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Extracting => "extraction",
            Stage::Analyzing => "analysis",
            Stage::Filtering => "filtering",
            Stage::Linking => "linking",
        };
        f.write_str(name)
    }
}

/// Lifecycle of a single pipeline run.
///
/// Transitions only move forward; `Failed` is terminal and records the stage
/// that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Extracting,
    Analyzing,
    Filtering,
    Linking,
    Done,
    Failed(Stage),
}

impl PipelineState {
    /// The stage being executed in this state, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineState::Extracting => Some(Stage::Extracting),
            PipelineState::Analyzing => Some(Stage::Analyzing),
            PipelineState::Filtering => Some(Stage::Filtering),
            PipelineState::Linking => Some(Stage::Linking),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed(_))
    }
}

impl From<Stage> for PipelineState {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::Extracting => PipelineState::Extracting,
            Stage::Analyzing => PipelineState::Analyzing,
            Stage::Filtering => PipelineState::Filtering,
            Stage::Linking => PipelineState::Linking,
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Idle => f.write_str("idle"),
            PipelineState::Done => f.write_str("done"),
            PipelineState::Failed(stage) => write!(f, "failed during {}", stage),
            other => match other.stage() {
                Some(stage) => write!(f, "{}", stage),
                None => Ok(()),
            },
        }
    }
}

/// A failed pipeline run: the stage that failed and why.
#[derive(Debug, thiserror::Error)]
#[error("Runtime image {stage} failed")]
pub struct PipelineError {
    pub stage: Stage,
    pub source: Error,
}

impl PipelineError {
    pub fn new(stage: Stage, source: Error) -> Self {
        Self { stage, source }
    }
}

/// The bundle contents materialised by the extraction stage.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTree {
    /// Directory the bundle was extracted into.
    pub root: PathBuf,
    /// Vendored library directory, relative to `root`.
    pub lib_dir: PathBuf,
}

/// The analyzer's module set and what is left of it after filtering.
///
/// `filtered` is always a subset of `raw`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleSelection {
    pub raw: ModuleSet,
    pub filtered: ModuleSet,
}

impl ModuleSelection {
    /// Modules present in `raw` but dropped by the exclusion rules.
    pub fn excluded(&self) -> ModuleSet {
        self.raw
            .iter()
            .filter(|m| !self.filtered.contains(m.as_str()))
            .cloned()
            .collect()
    }
}

/// A linked runtime image.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeImage {
    /// Image directory.
    pub path: PathBuf,
    /// Modules the image was linked from.
    pub modules: ModuleSet,
}

#[cfg(test)]
mod phase_tests {
    use super::*;

    #[test]
    fn test_state_stage_mapping() {
        for stage in [
            Stage::Extracting,
            Stage::Analyzing,
            Stage::Filtering,
            Stage::Linking,
        ] {
            assert_eq!(PipelineState::from(stage).stage(), Some(stage));
        }
        assert_eq!(PipelineState::Idle.stage(), None);
        assert_eq!(PipelineState::Done.stage(), None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(PipelineState::Done.is_terminal());
        assert!(PipelineState::Failed(Stage::Linking).is_terminal());
        assert!(!PipelineState::Idle.is_terminal());
        assert!(!PipelineState::Analyzing.is_terminal());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(PipelineState::Analyzing.to_string(), "analysis");
        assert_eq!(
            PipelineState::Failed(Stage::Extracting).to_string(),
            "failed during extraction"
        );
    }

    #[test]
    fn test_pipeline_error_names_stage() {
        let error = PipelineError::new(Stage::Linking, Error::link("no modules to link"));
        assert_eq!(error.to_string(), "Runtime image linking failed");

        let cause = std::error::Error::source(&error).map(|e| e.to_string());
        assert_eq!(cause.as_deref(), Some("Link error: no modules to link"));
    }

    #[test]
    fn test_selection_excluded() {
        let raw = ModuleSet::parse_listing("core,io,toolchain.agent").unwrap();
        let filtered = ModuleSet::parse_listing("core,io").unwrap();
        let selection = ModuleSelection { raw, filtered };
        assert_eq!(
            selection.excluded(),
            ModuleSet::parse_listing("toolchain.agent").unwrap()
        );
    }
}
