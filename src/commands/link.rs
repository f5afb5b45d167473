//! Link command implementation
//!
//! The link command executes the full pipeline:
//! 1. Extracting the bundle into `<build>/libs`
//! 2. Analyzing its module dependencies
//! 3. Filtering out toolchain modules
//! 4. Linking the stripped runtime image

use anyhow::Result;
use clap::Args;
use std::time::Instant;

use app_jre::output::{emoji, OutputConfig};
use app_jre::phases::Pipeline;
use app_jre::toolchain::DefaultToolOperations;

use super::PipelineArgs;

/// Arguments for the link command
#[derive(Args, Debug)]
pub struct LinkArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the link command
pub fn execute(args: LinkArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let start_time = Instant::now();

    let config = args.pipeline.load_config()?;
    let layout = config.layout()?;
    let tools = DefaultToolOperations::for_java_home(config.java_home.as_deref())?;

    if !args.quiet {
        println!(
            "{} Creating runtime image for {}",
            emoji(&out, "📦", "[JRE]"),
            layout.artifact
        );
    }

    let mut pipeline = Pipeline::new(layout, &tools);
    match pipeline.run() {
        Ok(image) => {
            if !args.quiet {
                println!(
                    "{} Linked {} modules in {:.2}s",
                    emoji(&out, "✅", "[OK]"),
                    image.modules.len(),
                    start_time.elapsed().as_secs_f64()
                );
                println!("   Modules: {}", image.modules);
                println!("   Image written to: {}", image.path.display());
            }
            Ok(())
        }
        Err(e) => {
            if !args.quiet {
                println!("{} Runtime image {} failed", emoji(&out, "❌", "[ERR]"), e.stage);
            }
            Err(e.into())
        }
    }
}
