//! # CLI Command Implementations
//!
//! Each subcommand of `app-jre` lives in its own file with an `Args` struct
//! derived using `clap` and an `execute` function.
//!
//! The pipeline commands share [`PipelineArgs`], which loads the optional
//! `.app-jre.yaml` file and applies command-line overrides on top of it.

pub mod completions;
pub mod link;
pub mod modules;
pub mod validate;

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;

use app_jre::config::{self, JreConfig};
use app_jre::defaults;

/// Options shared by every command that resolves a build layout
#[derive(Args, Debug, Default)]
pub struct PipelineArgs {
    /// Path to the configuration file (defaults to ./.app-jre.yaml when present)
    #[arg(short, long, value_name = "FILE", env = "APP_JRE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Artifact name; the bundle is <artifact>-<version>.jar
    #[arg(long, value_name = "NAME")]
    pub artifact: Option<String>,

    /// Artifact version
    #[arg(long, value_name = "VERSION")]
    pub artifact_version: Option<String>,

    /// Platform major release used for multi-release archives
    #[arg(long, value_name = "N")]
    pub release: Option<String>,

    /// Build output root containing libs/
    #[arg(long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Module prefix to exclude (repeatable; replaces the configured list)
    #[arg(long, value_name = "PREFIX")]
    pub exclude: Vec<String>,

    /// Do not exclude any modules
    #[arg(long, conflicts_with = "exclude")]
    pub no_exclude: bool,

    /// JDK providing jar, jdeps and jlink
    #[arg(long, value_name = "DIR", env = "JAVA_HOME")]
    pub java_home: Option<PathBuf>,

    /// jlink compression level (e.g. zip-6)
    #[arg(long, value_name = "LEVEL")]
    pub compress: Option<String>,
}

impl PipelineArgs {
    /// Load the configuration file, if any, and apply the overrides.
    pub fn load_config(&self) -> Result<JreConfig> {
        let mut config = match &self.config {
            Some(path) => {
                if !path.exists() {
                    bail!("Configuration file not found: {}", path.display());
                }
                config::from_file(path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))?
            }
            None => {
                let default_path = PathBuf::from(defaults::DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    config::from_file(&default_path).with_context(|| {
                        format!("Failed to load config from {}", default_path.display())
                    })?
                } else {
                    JreConfig::default()
                }
            }
        };

        if let Some(artifact) = &self.artifact {
            config.artifact = Some(artifact.clone());
        }
        if let Some(version) = &self.artifact_version {
            config.version = Some(version.clone());
        }
        if let Some(release) = &self.release {
            config.release = release.clone();
        }
        if let Some(build_dir) = &self.build_dir {
            config.build_dir = build_dir.clone();
        }
        if self.no_exclude {
            config.exclude.clear();
        } else if !self.exclude.is_empty() {
            config.exclude = self.exclude.clone();
        }
        if let Some(java_home) = &self.java_home {
            config.java_home = Some(java_home.clone());
        }
        if let Some(level) = &self.compress {
            config.compress = Some(level.clone());
        }

        Ok(config)
    }
}
