//! # app-jre Library
//!
//! This library turns a packaged Spring Boot style bundle into a minimal Java
//! runtime image. It is used by the `app-jre` command-line tool but can be
//! embedded in any build driver that wants the same post-processing step.
//!
//! ## Quick Example
//!
//! ```
//! use app_jre::modules::{ExclusionRule, ModuleSet};
//!
//! // Module listing as printed by the dependency analyzer
//! let raw = ModuleSet::parse_listing("java.base,java.sql,org.graalvm.sdk\n").unwrap();
//!
//! // Drop the ahead-of-time toolchain's own modules
//! let rules = ExclusionRule::parse_all(["org.graalvm"]).unwrap();
//! let filtered = raw.filter(&rules);
//!
//! assert_eq!(filtered.to_listing(), "java.base,java.sql");
//! assert!(filtered.is_subset(&raw));
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: The `.app-jre.yaml` schema and its
//!   resolution into a `PipelineLayout` of concrete paths.
//! - **Modules (`modules`)**: Validated module names, module sets and the
//!   prefix-based exclusion filter.
//! - **Toolchain (`toolchain`, `jdk`)**: The `ToolOperations` trait over the
//!   external `jar`, `jdeps` and `jlink` invocations, and its default
//!   process-spawning implementation.
//! - **Phases (`phases`)**: The staged pipeline and its orchestrator.
//!
//! ## Execution Flow
//!
//! The main entry point is `phases::Pipeline`, which executes:
//!
//! 1.  **Extracting**: Unpack the bundle into `<build>/libs`.
//! 2.  **Analyzing**: Run the dependency analyzer over the bundle with its
//!     vendored libraries as classpath.
//! 3.  **Filtering**: Remove modules matching the exclusion prefixes.
//! 4.  **Linking**: Delete the stale image and link a stripped one.
//!
//! The first failing stage ends the run and is reported in a
//! `phases::PipelineError`.

pub mod config;
pub mod defaults;
pub mod error;
pub mod jdk;
pub mod modules;
pub mod output;
pub mod phases;
pub mod toolchain;

#[cfg(test)]
mod modules_proptest;
