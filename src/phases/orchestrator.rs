//! Orchestrator for a complete runtime image build
//!
//! This module sequences the four stages behind a small state machine:
//!
//! ```text
//! Idle -> Extracting -> Analyzing -> Filtering -> Linking -> Done
//!              \            \            \           \
//!               +------------+------------+-----------+--> Failed(stage)
//! ```
//!
//! Transitions only move forward and there is no retry. The first stage error
//! moves the pipeline to `Failed` and is returned as a [`PipelineError`]
//! naming that stage; the remaining stages are skipped. A stale image is
//! deleted on entry to `Linking`.
//!
//! A `Pipeline` runs once. Concurrent runs against the same output directory
//! must be serialised by the caller.

use log::info;

use super::link::remove_stale_image;
use super::{
    analyze, extract, filter, link, ModuleSelection, PipelineError, PipelineState, RuntimeImage,
    Stage,
};
use crate::config::PipelineLayout;
use crate::error::Error;
use crate::toolchain::ToolOperations;

pub struct Pipeline<'a> {
    layout: PipelineLayout,
    tools: &'a dyn ToolOperations,
    state: PipelineState,
    history: Vec<PipelineState>,
}

impl<'a> Pipeline<'a> {
    pub fn new(layout: PipelineLayout, tools: &'a dyn ToolOperations) -> Self {
        Self {
            layout,
            tools,
            state: PipelineState::Idle,
            history: vec![PipelineState::Idle],
        }
    }

    pub fn layout(&self) -> &PipelineLayout {
        &self.layout
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Every state the pipeline has been in, oldest first.
    pub fn history(&self) -> &[PipelineState] {
        &self.history
    }

    fn enter(&mut self, next: PipelineState) {
        info!("{} -> {}", self.state, next);
        self.state = next;
        self.history.push(next);
    }

    fn fail(&mut self, stage: Stage, source: Error) -> PipelineError {
        self.enter(PipelineState::Failed(stage));
        PipelineError::new(stage, source)
    }

    fn start(&mut self) -> Result<(), PipelineError> {
        if self.state != PipelineState::Idle {
            return Err(PipelineError::new(
                Stage::Extracting,
                Error::InvalidState {
                    message: format!("pipeline already ran (state: {})", self.state),
                },
            ));
        }
        info!("building runtime image for {}", self.layout.artifact);
        Ok(())
    }

    /// Run one stage: enter its state, and fail the pipeline on error.
    fn stage<T>(
        &mut self,
        stage: Stage,
        body: impl FnOnce(&Self) -> crate::error::Result<T>,
    ) -> Result<T, PipelineError> {
        self.enter(stage.into());
        match body(&*self) {
            Ok(value) => Ok(value),
            Err(e) => Err(self.fail(stage, e)),
        }
    }

    fn select_modules(&mut self) -> Result<ModuleSelection, PipelineError> {
        let tree = self.stage(Stage::Extracting, |p| extract::execute(p.tools, &p.layout))?;
        let listing = self.stage(Stage::Analyzing, |p| {
            analyze::execute(p.tools, &tree, &p.layout)
        })?;
        self.stage(Stage::Filtering, |p| {
            filter::execute(&listing, &p.layout.exclusions)
        })
    }

    /// Execute the complete pipeline and return the linked image.
    pub fn run(&mut self) -> Result<RuntimeImage, PipelineError> {
        self.start()?;
        let selection = self.select_modules()?;

        let image = self.stage(Stage::Linking, |p| {
            remove_stale_image(&p.layout.image_path())?;
            link::execute(p.tools, &selection.filtered, &p.layout)
        })?;

        self.enter(PipelineState::Done);
        info!(
            "runtime image with {} module(s) written to {}",
            image.modules.len(),
            image.path.display()
        );
        Ok(image)
    }

    /// Execute extraction, analysis and filtering only.
    ///
    /// Nothing is linked and an existing image is left untouched.
    pub fn resolve_modules(&mut self) -> Result<ModuleSelection, PipelineError> {
        self.start()?;
        let selection = self.select_modules()?;
        self.enter(PipelineState::Done);
        Ok(selection)
    }
}

/// Build a runtime image for `layout` in one call.
pub fn execute(
    layout: PipelineLayout,
    tools: &dyn ToolOperations,
) -> Result<RuntimeImage, PipelineError> {
    Pipeline::new(layout, tools).run()
}
