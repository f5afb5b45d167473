//! # JDK Toolchain Abstraction
//!
//! The pipeline drives three external JDK tools: `jar` to unpack the bundle,
//! `jdeps` to compute module dependencies and `jlink` to assemble the image.
//! They sit behind the [`ToolOperations`] trait, one method per external call,
//! so the pipeline's sequencing and error mapping can be exercised with fake
//! implementations instead of a real JDK.
//!
//! [`DefaultToolOperations`] is the production implementation; it resolves
//! the tools from a Java home (or `PATH`) and delegates to [`crate::jdk`].

use std::path::{Path, PathBuf};

use crate::defaults;
use crate::error::Result;
use crate::modules::ModuleSet;

/// Input to the dependency analyzer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    /// Directory the analyzer runs in; the bundle was extracted here.
    pub working_dir: PathBuf,
    /// Bundle file name, relative to `working_dir`.
    pub bundle_name: String,
    /// Vendored library archives, relative to `working_dir`.
    pub classpath: Vec<PathBuf>,
    /// Platform major release for multi-release archives.
    pub release: String,
}

/// Input to the image linker.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRequest {
    /// Directory the linker runs in.
    pub working_dir: PathBuf,
    /// Modules to place in the image; never empty.
    pub modules: ModuleSet,
    /// Image directory, relative to `working_dir`.
    pub output: PathBuf,
    /// Optional `--compress` level.
    pub compress: Option<String>,
}

/// Trait for external tool invocations - allows faking in tests
pub trait ToolOperations {
    /// Extract every entry of `bundle_name` into `working_dir`.
    fn extract(&self, working_dir: &Path, bundle_name: &str) -> Result<()>;

    /// Run the dependency analyzer and return its delimited module listing.
    fn analyze(&self, request: &AnalysisRequest) -> Result<String>;

    /// Link a stripped runtime image.
    fn link(&self, request: &LinkRequest) -> Result<()>;
}

/// Tool locations used by [`DefaultToolOperations`].
#[derive(Debug, Clone, PartialEq)]
pub struct ToolPaths {
    pub jar: PathBuf,
    pub jdeps: PathBuf,
    pub jlink: PathBuf,
}

impl ToolPaths {
    /// Resolve the tools from `<java_home>/bin`, or from `PATH` without a
    /// Java home.
    ///
    /// A relative Java home is made absolute, since every tool runs with the
    /// working directory as its current directory.
    pub fn resolve(java_home: Option<&Path>) -> Result<Self> {
        let home = match java_home {
            Some(home) => Some(std::path::absolute(home)?),
            None => None,
        };
        let home = home.as_deref();

        Ok(Self {
            jar: defaults::tool_path(home, "jar"),
            jdeps: defaults::tool_path(home, "jdeps"),
            jlink: defaults::tool_path(home, "jlink"),
        })
    }
}

/// The default implementation of `ToolOperations`, which spawns the real JDK
/// tools.
#[derive(Debug, Clone)]
pub struct DefaultToolOperations {
    paths: ToolPaths,
}

impl DefaultToolOperations {
    pub fn new(paths: ToolPaths) -> Self {
        Self { paths }
    }

    /// Resolve the tools for `java_home` and wrap them.
    pub fn for_java_home(java_home: Option<&Path>) -> Result<Self> {
        Ok(Self::new(ToolPaths::resolve(java_home)?))
    }
}

impl ToolOperations for DefaultToolOperations {
    fn extract(&self, working_dir: &Path, bundle_name: &str) -> Result<()> {
        crate::jdk::extract_bundle(&self.paths.jar, working_dir, bundle_name)
    }

    fn analyze(&self, request: &AnalysisRequest) -> Result<String> {
        crate::jdk::print_module_deps(&self.paths.jdeps, request)
    }

    fn link(&self, request: &LinkRequest) -> Result<()> {
        crate::jdk::link_image(&self.paths.jlink, request)
    }
}
