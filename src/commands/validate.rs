//! # Validate Command Implementation
//!
//! Loads the configuration, applies the command-line overrides and resolves
//! the build layout without running any tool. Reports the resolved paths and
//! warns about things that would make a later `link` fail:
//!
//! - the bundle has not been packaged yet,
//! - the JDK tools are missing from the configured Java home.
//!
//! Configuration errors fail the command. Warnings only fail it with
//! `--strict`.

use anyhow::Result;
use clap::Args;

use app_jre::config::PipelineLayout;
use app_jre::output::{emoji, OutputConfig};
use app_jre::toolchain::ToolPaths;

use super::PipelineArgs;

/// Validate the configuration and resolved layout
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Use strict validation (fail on warnings).
    #[arg(long)]
    pub strict: bool,
}

/// Collect warnings for a resolved layout.
fn warnings(layout: &PipelineLayout, tools: &ToolPaths) -> Vec<String> {
    let mut warnings = Vec::new();

    if !layout.bundle_path().is_file() {
        warnings.push(format!(
            "bundle {} does not exist yet",
            layout.bundle_path().display()
        ));
    }

    // Bare tool names are resolved through PATH at run time.
    for tool in [&tools.jar, &tools.jdeps, &tools.jlink] {
        if tool.components().count() > 1 && !tool.is_file() {
            warnings.push(format!("tool {} not found", tool.display()));
        }
    }

    warnings
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);

    let config = args.pipeline.load_config()?;
    let layout = match config.layout() {
        Ok(layout) => layout,
        Err(e) => {
            println!("{} Configuration is invalid: {}", emoji(&out, "❌", "[ERR]"), e);
            return Err(e.into());
        }
    };
    let tools = ToolPaths::resolve(config.java_home.as_deref())?;

    println!("{} Configuration is valid", emoji(&out, "✅", "[OK]"));
    println!("\n{} Resolved layout:", emoji(&out, "📊", "[INFO]"));
    println!("   Bundle: {}", layout.bundle_path().display());
    println!("   Libraries: {}", layout.lib_path().display());
    println!("   Image: {}", layout.image_path().display());
    println!("   Release: {}", layout.release);
    let prefixes: Vec<&str> = layout.exclusions.iter().map(|r| r.prefix()).collect();
    if prefixes.is_empty() {
        println!("   Excluded prefixes: (none)");
    } else {
        println!("   Excluded prefixes: {}", prefixes.join(", "));
    }

    let warnings = warnings(&layout, &tools);
    for warning in &warnings {
        println!("{} {}", emoji(&out, "⚠️", "[WARN]"), warning);
    }

    if args.strict && !warnings.is_empty() {
        anyhow::bail!("Validation failed with {} warning(s)", warnings.len());
    }

    Ok(())
}
