//! Fake `ToolOperations` for stage and pipeline tests.
//!
//! The fake touches the real (temporary) filesystem the way the JDK tools
//! would: extraction drops library archives into the working directory and
//! linking creates the image directory with a `release` file listing the
//! linked modules.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::toolchain::{AnalysisRequest, LinkRequest, ToolOperations};

#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    Extract {
        working_dir: PathBuf,
        bundle_name: String,
    },
    Analyze(AnalysisRequest),
    Link(LinkRequest),
}

pub struct FakeTools {
    pub calls: Arc<Mutex<Vec<ToolCall>>>,
    listing: String,
    lib_dir: PathBuf,
    lib_jars: Vec<String>,
    fail_extract: bool,
    fail_analyze: bool,
    fail_link: bool,
    skip_image: bool,
}

impl FakeTools {
    pub fn new(listing: &str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            listing: listing.to_string(),
            lib_dir: PathBuf::from("BOOT-INF/lib"),
            lib_jars: vec!["spring-core.jar".to_string(), "jackson.jar".to_string()],
            fail_extract: false,
            fail_analyze: false,
            fail_link: false,
            skip_image: false,
        }
    }

    pub fn failing_extract(mut self) -> Self {
        self.fail_extract = true;
        self
    }

    pub fn failing_analyze(mut self) -> Self {
        self.fail_analyze = true;
        self
    }

    /// jlink fails after writing part of the image.
    pub fn failing_link(mut self) -> Self {
        self.fail_link = true;
        self
    }

    /// jlink reports success without creating the image.
    pub fn without_image(mut self) -> Self {
        self.skip_image = true;
        self
    }

    pub fn recorded(&self) -> Vec<ToolCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ToolCall) {
        self.calls.lock().unwrap().push(call);
    }
}

/// Modules recorded in a fake image's `release` file.
pub fn image_modules(image: &Path) -> String {
    let release = fs::read_to_string(image.join("release")).unwrap();
    release
        .trim()
        .trim_start_matches("MODULES=\"")
        .trim_end_matches('"')
        .to_string()
}

impl ToolOperations for FakeTools {
    fn extract(&self, working_dir: &Path, bundle_name: &str) -> Result<()> {
        self.record(ToolCall::Extract {
            working_dir: working_dir.to_path_buf(),
            bundle_name: bundle_name.to_string(),
        });
        if self.fail_extract {
            return Err(Error::Extraction {
                bundle: bundle_name.to_string(),
                message: "jar exited with status 1".to_string(),
                hint: None,
            });
        }

        let lib = working_dir.join(&self.lib_dir);
        fs::create_dir_all(&lib)?;
        for jar in &self.lib_jars {
            fs::write(lib.join(jar), b"PK")?;
        }
        fs::create_dir_all(working_dir.join("BOOT-INF/classes"))?;
        Ok(())
    }

    fn analyze(&self, request: &AnalysisRequest) -> Result<String> {
        self.record(ToolCall::Analyze(request.clone()));
        if self.fail_analyze {
            return Err(Error::analysis("jdeps exited with status 2"));
        }
        Ok(self.listing.clone())
    }

    fn link(&self, request: &LinkRequest) -> Result<()> {
        self.record(ToolCall::Link(request.clone()));
        let image = request.working_dir.join(&request.output);

        if self.fail_link {
            fs::create_dir_all(image.join("lib"))?;
            return Err(Error::link("jlink exited with status 1"));
        }
        if self.skip_image {
            return Ok(());
        }

        fs::create_dir_all(image.join("bin"))?;
        fs::write(
            image.join("release"),
            format!("MODULES=\"{}\"\n", request.modules.to_listing()),
        )?;
        Ok(())
    }
}
