//! Shared test utilities for CLI end-to-end tests.
//!
//! The fixture builds a throwaway project directory with a packaged bundle
//! under `build/libs` and, on Unix, a fake JDK whose `jar`, `jdeps` and
//! `jlink` are small shell scripts. The scripts behave like the real tools
//! as far as the pipeline can observe: `jar` drops library archives,
//! `jdeps` prints a fixed module listing and `jlink` creates the image with
//! a `release` file naming the linked modules. Like the real `jlink`, the
//! fake reports its errors on stdout. `jdeps` and `jlink` save
//! their arguments next to the bundle for assertions.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new()
//!     .with_bundle()
//!     .with_fake_jdk("java.base,org.graalvm.sdk");
//! fixture.command().arg("link").assert().success();
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Configuration snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// Names the bundle `demo-server-0.0.1-SNAPSHOT.jar`.
    pub const DEMO: &str = r#"
artifact: demo-server
version: 0.0.1-SNAPSHOT
"#;

    /// Missing the version.
    pub const NO_VERSION: &str = "artifact: demo-server\n";

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "artifact: [unclosed";
}

#[allow(dead_code)]
const FAKE_JAR: &str = r#"#!/bin/sh
[ "$1" = "xf" ] || { echo "usage: jar xf <bundle>" >&2; exit 2; }
[ -f "$2" ] || { echo "java.io.FileNotFoundException: $2" >&2; exit 1; }
mkdir -p BOOT-INF/lib BOOT-INF/classes META-INF
: > BOOT-INF/lib/spring-core.jar
: > BOOT-INF/lib/jackson-databind.jar
"#;

#[allow(dead_code)]
const FAKE_JDEPS: &str = r#"#!/bin/sh
echo "$@" > jdeps.args
[ '@LISTING@' = 'corrupt' ] && { echo "Error: invalid CEN header (bad signature)"; exit 1; }
printf '%s\n' '@LISTING@'
"#;

#[allow(dead_code)]
const FAKE_JLINK: &str = r#"#!/bin/sh
echo "$@" > jlink.args
out=""
mods=""
while [ $# -gt 0 ]; do
  case "$1" in
    --output) out="$2"; shift ;;
    --add-modules) mods="$2"; shift ;;
  esac
  shift
done
[ -e "$out" ] && { echo "Error: directory already exists: $out"; exit 1; }
mkdir -p "$out/bin" "$out/lib"
case ",$mods," in
  *,missing.module,*) echo "Error: Module missing.module not found"; exit 1 ;;
  *,full.disk,*) echo "Error: java.io.IOException: No space left on device"; exit 1 ;;
esac
printf 'MODULES="%s"\n' "$mods" > "$out/release"
"#;

pub const ARTIFACT: &str = "demo-server";
pub const VERSION: &str = "0.0.1-SNAPSHOT";

/// A temporary project directory.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `.app-jre.yaml` configuration file with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child(".app-jre.yaml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Add a packaged bundle at `build/libs/<artifact>-<version>.jar`.
    pub fn with_bundle(self) -> Self {
        self.temp_dir
            .child(format!("build/libs/{}-{}.jar", ARTIFACT, VERSION))
            .write_binary(b"PK\x03\x04")
            .expect("Failed to write bundle");
        self
    }

    /// Install a fake JDK under `jdk/` whose analyzer prints `listing`.
    ///
    /// The listing `corrupt` makes the analyzer fail with an error on stdout.
    #[cfg(unix)]
    pub fn with_fake_jdk(self, listing: &str) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let bin = self.temp_dir.child("jdk/bin");
        bin.create_dir_all().expect("Failed to create jdk/bin");
        let jdeps = FAKE_JDEPS.replace("@LISTING@", listing);
        for (name, script) in [("jar", FAKE_JAR), ("jdeps", jdeps.as_str()), ("jlink", FAKE_JLINK)] {
            let tool = bin.child(name);
            tool.write_str(script).expect("Failed to write fake tool");
            std::fs::set_permissions(tool.path(), std::fs::Permissions::from_mode(0o755))
                .expect("Failed to make fake tool executable");
        }
        self
    }

    /// Create a directory (and its parents) inside the fixture.
    pub fn child_dir(&self, path: &str) {
        self.temp_dir
            .child(path)
            .create_dir_all()
            .expect("Failed to create directory");
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// `build/libs`, where the bundle is extracted and the image is written.
    pub fn libs(&self) -> PathBuf {
        self.path().join("build/libs")
    }

    /// Path of the runtime image.
    pub fn image(&self) -> PathBuf {
        self.libs().join("app-jre")
    }

    /// Modules recorded in the image's `release` file.
    pub fn image_modules(&self) -> String {
        let release =
            std::fs::read_to_string(self.image().join("release")).expect("image has no release");
        release
            .trim()
            .trim_start_matches("MODULES=\"")
            .trim_end_matches('"')
            .to_string()
    }

    /// Arguments the fake `tool` was last called with.
    pub fn tool_args(&self, tool: &str) -> String {
        std::fs::read_to_string(self.libs().join(format!("{}.args", tool)))
            .expect("tool was not called")
            .trim()
            .to_string()
    }

    /// Create a command running in this fixture's directory, isolated from
    /// the caller's environment and pointed at the fake JDK.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("app-jre");
        cmd.current_dir(self.path())
            .env_remove("APP_JRE_CONFIG")
            .env_remove("RUST_LOG")
            .env("JAVA_HOME", self.path().join("jdk"))
            .arg("--color")
            .arg("never");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
