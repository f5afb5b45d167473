//! # Configuration Schema and Parsing
//!
//! This module defines the `.app-jre.yaml` configuration file and the logic
//! for loading and validating it. Every field is optional in the file; values
//! missing from it come from [`crate::defaults`], and the CLI can override any
//! of them before the configuration is validated.
//!
//! ## Example
//!
//! ```yaml
//! artifact: demo-server
//! version: 0.0.1-SNAPSHOT
//! release: "21"
//! build_dir: build
//! exclude:
//!   - org.graalvm
//! compress: zip-6
//! ```
//!
//! Validation turns a `JreConfig` into a [`PipelineLayout`], the resolved set
//! of paths and settings the pipeline runs against.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};
use crate::modules::ExclusionRule;

/// Contents of an `.app-jre.yaml` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JreConfig {
    /// Artifact name; the bundle is `<artifact>-<version>.<extension>`.
    pub artifact: Option<String>,
    /// Artifact version string.
    pub version: Option<String>,
    /// Platform major release used for multi-release analysis.
    pub release: String,
    /// Build output root.
    pub build_dir: PathBuf,
    /// Bundle file extension.
    pub extension: String,
    /// Vendored library directory inside the extracted bundle.
    pub lib_dir: PathBuf,
    /// Directory name of the generated image.
    pub image_name: String,
    /// Module prefixes removed before linking.
    pub exclude: Vec<String>,
    /// JDK used for `jar`, `jdeps` and `jlink`; `PATH` is used when unset.
    pub java_home: Option<PathBuf>,
    /// Optional `jlink --compress` level.
    pub compress: Option<String>,
}

impl Default for JreConfig {
    fn default() -> Self {
        Self {
            artifact: None,
            version: None,
            release: defaults::DEFAULT_RELEASE.to_string(),
            build_dir: PathBuf::from(defaults::DEFAULT_BUILD_DIR),
            extension: defaults::DEFAULT_EXTENSION.to_string(),
            lib_dir: PathBuf::from(defaults::DEFAULT_LIB_DIR),
            image_name: defaults::DEFAULT_IMAGE_NAME.to_string(),
            exclude: defaults::default_exclusions(),
            java_home: None,
            compress: None,
        }
    }
}

/// Parse a YAML string into a configuration.
///
/// An empty document yields the defaults.
pub fn parse(yaml_content: &str) -> Result<JreConfig> {
    if yaml_content.trim().is_empty() {
        return Ok(JreConfig::default());
    }
    Ok(serde_yaml::from_str(yaml_content)?)
}

/// Load the configuration from a file
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<JreConfig> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Resolved paths and settings for one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineLayout {
    /// Human-readable artifact name, used in log output.
    pub artifact: String,
    /// `<build>/libs`; the bundle is extracted here in place.
    pub working_dir: PathBuf,
    /// File name of the bundle inside `working_dir`.
    pub bundle_name: String,
    /// Vendored library directory, relative to `working_dir`.
    pub lib_dir: PathBuf,
    /// Directory name of the image inside `working_dir`.
    pub image_name: String,
    pub release: String,
    pub exclusions: Vec<ExclusionRule>,
    pub compress: Option<String>,
}

impl PipelineLayout {
    /// Full path of the bundle.
    pub fn bundle_path(&self) -> PathBuf {
        self.working_dir.join(&self.bundle_name)
    }

    /// Full path of the runtime image.
    pub fn image_path(&self) -> PathBuf {
        self.working_dir.join(&self.image_name)
    }

    /// Full path of the vendored library directory.
    pub fn lib_path(&self) -> PathBuf {
        self.working_dir.join(&self.lib_dir)
    }
}

fn required<'a>(value: &'a Option<String>, field: &str, flag: &str) -> Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::ConfigParse {
            message: format!("'{}' is required", field),
            hint: Some(format!("Pass {} or set '{}:' in the config file", flag, field)),
        }),
    }
}

fn single_component(value: &str, field: &str) -> Result<()> {
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(Error::ConfigParse {
            message: format!("'{}' must be a plain name, got '{}'", field, value),
            hint: None,
        }),
    }
}

impl JreConfig {
    /// Validate the configuration and resolve the pipeline layout.
    pub fn layout(&self) -> Result<PipelineLayout> {
        let artifact = required(&self.artifact, "artifact", "--artifact")?;
        let version = required(&self.version, "version", "--artifact-version")?;
        let bundle_name = format!("{}-{}.{}", artifact, version, self.extension);
        single_component(&bundle_name, "artifact/version")?;

        if self.release.is_empty() || !self.release.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::ConfigParse {
                message: format!("release must be a major version number, got '{}'", self.release),
                hint: Some("e.g. release: \"21\"".to_string()),
            });
        }

        if self.extension.is_empty() {
            return Err(Error::ConfigParse {
                message: "extension must not be empty".to_string(),
                hint: None,
            });
        }

        single_component(&self.image_name, "image_name")?;

        if self.lib_dir.as_os_str().is_empty()
            || !self
                .lib_dir
                .components()
                .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(Error::ConfigParse {
                message: format!(
                    "lib_dir must be a relative path inside the bundle, got '{}'",
                    self.lib_dir.display()
                ),
                hint: None,
            });
        }

        if let Some(level) = &self.compress {
            if level.trim().is_empty() {
                return Err(Error::ConfigParse {
                    message: "compress must not be empty when set".to_string(),
                    hint: Some("e.g. compress: zip-6".to_string()),
                });
            }
        }

        let exclusions = ExclusionRule::parse_all(self.exclude.iter().cloned())?;

        Ok(PipelineLayout {
            artifact: artifact.to_string(),
            working_dir: self.build_dir.join(defaults::LIBS_DIR),
            bundle_name,
            lib_dir: self.lib_dir.clone(),
            image_name: self.image_name.clone(),
            release: self.release.clone(),
            exclusions,
            compress: self.compress.clone(),
        })
    }
}
