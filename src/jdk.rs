//! Invocations of the JDK command line tools.
//!
//! Each function spawns one tool with the working directory as its current
//! directory, forwards the tool's diagnostics to our stderr unmodified and
//! maps failures onto the error variant of the stage it serves.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Output};

use log::debug;
use regex::Regex;

use crate::error::{Error, Result};
use crate::toolchain::{AnalysisRequest, LinkRequest};

/// Flags that strip debug information, header files and man pages from the
/// linked image.
pub const STRIP_FLAGS: [&str; 3] = ["--strip-debug", "--no-header-files", "--no-man-pages"];

fn describe(program: &Path, args: &[OsString]) -> String {
    let mut line = program.display().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

/// Write a finished tool's diagnostics to `sink` unmodified.
///
/// stderr is always forwarded. The JDK tools report most errors on stdout,
/// so stdout is forwarded too when the tool failed; a successful tool's
/// stdout is its result and stays with the caller.
fn forward_diagnostics(output: &Output, sink: &mut dyn Write) -> io::Result<()> {
    sink.write_all(&output.stderr)?;
    if !output.status.success() {
        sink.write_all(&output.stdout)?;
    }
    sink.flush()
}

/// Spawn `program` in `working_dir` and wait for it.
///
/// Output is captured and the diagnostics are then written to our own
/// stderr, so the caller can still inspect them.
fn run_tool(program: &Path, args: &[OsString], working_dir: &Path) -> io::Result<Output> {
    debug!("running in {}: {}", working_dir.display(), describe(program, args));

    let output = Command::new(program)
        .args(args)
        .current_dir(working_dir)
        .output()?;

    // A closed stderr must not fail the run.
    if let Err(e) = forward_diagnostics(&output, &mut io::stderr().lock()) {
        debug!("could not forward diagnostics: {}", e);
    }

    Ok(output)
}

fn status_message(tool: &str, output: &Output) -> String {
    match output.status.code() {
        Some(code) => format!("{} exited with status {}", tool, code),
        None => format!("{} was terminated by a signal", tool),
    }
}

/// Arguments for `jar` to extract a bundle.
pub fn jar_args(bundle_name: &str) -> Vec<OsString> {
    vec!["xf".into(), bundle_name.into()]
}

/// Extract a bundle into its working directory with `jar xf`.
pub fn extract_bundle(jar: &Path, working_dir: &Path, bundle_name: &str) -> Result<()> {
    let output =
        run_tool(jar, &jar_args(bundle_name), working_dir).map_err(|e| Error::Extraction {
            bundle: bundle_name.to_string(),
            message: format!("failed to run {}: {}", jar.display(), e),
            hint: Some("Set JAVA_HOME or put the JDK's bin directory on PATH".to_string()),
        })?;

    if !output.status.success() {
        return Err(Error::Extraction {
            bundle: bundle_name.to_string(),
            message: status_message("jar", &output),
            hint: None,
        });
    }

    Ok(())
}

/// Arguments for `jdeps` to print the module closure of a bundle.
///
/// Missing dependencies are ignored so references to optional platform
/// features in vendored archives do not fail the analysis.
pub fn jdeps_args(request: &AnalysisRequest) -> Result<Vec<OsString>> {
    let classpath = std::env::join_paths(&request.classpath).map_err(|e| Error::Analysis {
        message: format!("cannot build the analysis classpath: {}", e),
        hint: Some("library archive names must not contain the path separator".to_string()),
    })?;

    Ok(vec![
        "--ignore-missing-deps".into(),
        "--recursive".into(),
        "--print-module-deps".into(),
        "--multi-release".into(),
        request.release.clone().into(),
        "--class-path".into(),
        classpath,
        request.bundle_name.clone().into(),
    ])
}

/// Run `jdeps` and return its module listing.
pub fn print_module_deps(jdeps: &Path, request: &AnalysisRequest) -> Result<String> {
    let args = jdeps_args(request)?;
    let output = run_tool(jdeps, &args, &request.working_dir).map_err(|e| Error::Analysis {
        message: format!("failed to run {}: {}", jdeps.display(), e),
        hint: Some("Set JAVA_HOME or put the JDK's bin directory on PATH".to_string()),
    })?;

    if !output.status.success() {
        return Err(Error::Analysis {
            message: status_message("jdeps", &output),
            hint: Some("a classpath entry may be corrupt".to_string()),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Arguments for `jlink` to build a stripped image.
pub fn jlink_args(request: &LinkRequest) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["--add-modules".into(), request.modules.to_listing().into()];
    args.extend(STRIP_FLAGS.iter().map(OsString::from));
    if let Some(level) = &request.compress {
        args.push("--compress".into());
        args.push(level.into());
    }
    args.push("--output".into());
    args.push(request.output.clone().into_os_string());
    args
}

/// Find the module jlink complained about, if any.
pub fn unknown_module(diagnostics: &str) -> Result<Option<String>> {
    let pattern = Regex::new(r"Module (\S+) not found")?;
    Ok(pattern
        .captures(diagnostics)
        .map(|caps| caps[1].to_string()))
}

/// Run `jlink`.
pub fn link_image(jlink: &Path, request: &LinkRequest) -> Result<()> {
    let output =
        run_tool(jlink, &jlink_args(request), &request.working_dir).map_err(|e| Error::Link {
            message: format!("failed to run {}: {}", jlink.display(), e),
            hint: Some("Set JAVA_HOME or put the JDK's bin directory on PATH".to_string()),
        })?;

    if output.status.success() {
        return Ok(());
    }

    let diagnostics = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let module = match unknown_module(&diagnostics)? {
        Some(module) => Some(module),
        None => unknown_module(&stdout)?,
    };

    Err(match module {
        Some(module) => Error::Link {
            message: format!("module '{}' is not known to the platform", module),
            hint: Some("Check that the JDK matches the configured release".to_string()),
        },
        None => Error::link(status_message("jlink", &output)),
    })
}
