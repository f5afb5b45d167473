//! Default values for app-jre configuration.
//!
//! This module provides centralized default values used by the configuration
//! loader and the CLI, keeping the conventional bundle layout in one place.

use std::path::{Path, PathBuf};

/// Configuration file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = ".app-jre.yaml";

/// Build output root; the bundle lives under `<build>/libs`.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Directory below the build output root holding packaged artifacts.
pub const LIBS_DIR: &str = "libs";

/// Platform release passed to the dependency analyzer for multi-release jars.
pub const DEFAULT_RELEASE: &str = "21";

/// Bundle file extension.
pub const DEFAULT_EXTENSION: &str = "jar";

/// Directory of vendored library archives inside an extracted bundle.
pub const DEFAULT_LIB_DIR: &str = "BOOT-INF/lib";

/// Directory name of the generated runtime image inside the libs directory.
pub const DEFAULT_IMAGE_NAME: &str = "app-jre";

/// Module prefixes belonging to the GraalVM ahead-of-time toolchain. They
/// only show up because the native-image build support sits on the analysis
/// classpath.
pub const DEFAULT_EXCLUDE_PREFIXES: &[&str] = &["org.graalvm"];

pub fn default_exclusions() -> Vec<String> {
    DEFAULT_EXCLUDE_PREFIXES
        .iter()
        .map(|prefix| prefix.to_string())
        .collect()
}

/// Returns the path of a JDK tool.
///
/// With a Java home the tool is taken from `<java_home>/bin`; without one the
/// bare executable name is returned and resolved through `PATH`.
pub fn tool_path(java_home: Option<&Path>, tool: &str) -> PathBuf {
    let executable = if cfg!(windows) {
        format!("{}.exe", tool)
    } else {
        tool.to_string()
    };

    match java_home {
        Some(home) => home.join("bin").join(executable),
        None => PathBuf::from(executable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_exclusions_cover_graalvm() {
        let exclusions = default_exclusions();
        assert_eq!(exclusions, vec!["org.graalvm".to_string()]);
    }

    #[test]
    fn test_tool_path_without_java_home_uses_path_lookup() {
        let path = tool_path(None, "jlink");
        assert!(path.starts_with("jlink"));
        assert_eq!(path.components().count(), 1);
    }

    #[test]
    fn test_tool_path_with_java_home() {
        let path = tool_path(Some(Path::new("/opt/jdk-21")), "jdeps");
        assert!(path.starts_with("/opt/jdk-21/bin"));
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("jdeps"));
    }
}
