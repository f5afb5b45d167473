//! Stage 3: Filtering
//!
//! Parses the analyzer's listing and removes every module matched by an
//! exclusion rule. Modules of the ahead-of-time compilation toolchain only
//! show up because that toolchain sits on the build classpath; the running
//! application never loads them.
//!
//! This stage performs no I/O.

use log::info;

use crate::error::Result;
use crate::modules::{ExclusionRule, ModuleSet};
use crate::phases::ModuleSelection;

/// Execute Stage 3: Filter the raw module listing
pub fn execute(listing: &str, rules: &[ExclusionRule]) -> Result<ModuleSelection> {
    let raw = ModuleSet::parse_listing(listing)?;
    let filtered = raw.filter(rules);

    let excluded = raw.len() - filtered.len();
    if excluded > 0 {
        info!(
            "excluded {} toolchain module(s): {}",
            excluded,
            raw.excluded_by(rules)
        );
    }

    Ok(ModuleSelection { raw, filtered })
}
