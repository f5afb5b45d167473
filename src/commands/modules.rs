//! # Modules Command Implementation
//!
//! Runs extraction, analysis and filtering, then reports which modules the
//! runtime image would contain and which ones the exclusion rules drop. No
//! image is linked and an existing image is left alone.
//!
//! With `--listing` only the comma-separated module list is printed, in the
//! form `jlink --add-modules` accepts, for use in scripts.

use anyhow::Result;
use clap::Args;

use app_jre::output::{emoji, OutputConfig};
use app_jre::phases::{ModuleSelection, Pipeline};
use app_jre::toolchain::DefaultToolOperations;

use super::PipelineArgs;

/// Show the modules a runtime image would be linked from
#[derive(Args, Debug)]
pub struct ModulesArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Print only the filtered module list, comma separated
    #[arg(long)]
    pub listing: bool,
}

/// Render the report lines for a module selection.
fn report(selection: &ModuleSelection, out: &OutputConfig) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} module(s) required",
        emoji(out, "🧩", "[MODULES]"),
        selection.filtered.len()
    )];
    lines.extend(out.module_lines(&selection.filtered, false));

    let excluded = selection.excluded();
    if !excluded.is_empty() {
        lines.push(format!(
            "{} {} module(s) excluded",
            emoji(out, "🚫", "[EXCLUDED]"),
            excluded.len()
        ));
        lines.extend(out.module_lines(&excluded, true));
    }
    lines
}

/// Execute the `modules` command.
pub fn execute(args: ModulesArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);

    let config = args.pipeline.load_config()?;
    let layout = config.layout()?;
    let tools = DefaultToolOperations::for_java_home(config.java_home.as_deref())?;

    let selection = Pipeline::new(layout, &tools).resolve_modules()?;

    if args.listing {
        println!("{}", selection.filtered);
    } else {
        for line in report(&selection, &out) {
            println!("{}", line);
        }
    }

    Ok(())
}
