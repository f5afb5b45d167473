//! # Platform Modules and Exclusion Rules
//!
//! Types describing the platform runtime modules that flow through the
//! pipeline, and the pure filter that removes build-toolchain modules from the
//! analyzer's result before linking.
//!
//! - **`ModuleName`**: a validated module name such as `java.base`.
//! - **`ModuleSet`**: a set of unique module names, iterated in name order so
//!   command lines and reports are deterministic.
//! - **`ExclusionRule`**: a name prefix; any module starting with it is
//!   removed by [`ModuleSet::filter`].

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Delimiter used in module listings (analyzer output and `--add-modules`).
pub const LISTING_DELIMITER: char = ',';

/// A validated platform module name.
///
/// A name is one or more dot-separated segments. Each segment is non-empty,
/// made of ASCII alphanumerics, `_` or `$`, and does not start with a digit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleName(String);

impl ModuleName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_module_name(&name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate_module_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::filter_config("module name is empty"));
    }

    for segment in name.split('.') {
        let mut chars = segment.chars();
        let valid = match chars.next() {
            Some(first) => {
                (first.is_ascii_alphabetic() || first == '_' || first == '$')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
            }
            None => false,
        };
        if !valid {
            return Err(Error::FilterConfig {
                message: format!("invalid module name '{}'", name),
                hint: Some(
                    "module names are dot-separated identifiers, e.g. 'java.base'".to_string(),
                ),
            });
        }
    }

    Ok(())
}

impl FromStr for ModuleName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A prefix rule removing modules from the set handed to the linker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRule {
    prefix: String,
}

impl ExclusionRule {
    /// Create a rule, rejecting prefixes that could never appear in a module
    /// listing.
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(Error::FilterConfig {
                message: "exclusion prefix is empty".to_string(),
                hint: Some("an empty prefix would exclude every module".to_string()),
            });
        }
        if prefix
            .chars()
            .any(|c| c.is_whitespace() || c == LISTING_DELIMITER)
        {
            return Err(Error::filter_config(format!(
                "exclusion prefix '{}' contains whitespace or '{}'",
                prefix, LISTING_DELIMITER
            )));
        }
        Ok(Self { prefix })
    }

    /// Parse every prefix in `prefixes`, failing on the first malformed one.
    pub fn parse_all<I, S>(prefixes: I) -> Result<Vec<Self>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        prefixes.into_iter().map(Self::new).collect()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn matches(&self, module: &ModuleName) -> bool {
        module.as_str().starts_with(&self.prefix)
    }
}

/// A set of unique module names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleSet {
    modules: BTreeSet<ModuleName>,
}

impl ModuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a delimited module listing such as `java.base,java.sql\n`.
    ///
    /// Tokens are trimmed and empty tokens dropped, so trailing newlines and
    /// an entirely empty listing are accepted.
    pub fn parse_listing(listing: &str) -> Result<Self> {
        listing
            .split(LISTING_DELIMITER)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(ModuleName::new)
            .collect()
    }

    pub fn contains(&self, module: &str) -> bool {
        self.modules.iter().any(|m| m.as_str() == module)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleName> {
        self.modules.iter()
    }

    pub fn is_subset(&self, other: &ModuleSet) -> bool {
        self.modules.is_subset(&other.modules)
    }

    /// Remove every module matched by one of `rules`.
    ///
    /// With no rules the result equals `self`.
    pub fn filter(&self, rules: &[ExclusionRule]) -> ModuleSet {
        self.modules
            .iter()
            .filter(|module| !rules.iter().any(|rule| rule.matches(module)))
            .cloned()
            .collect()
    }

    /// Modules removed by [`filter`](Self::filter) for the same rules.
    pub fn excluded_by(&self, rules: &[ExclusionRule]) -> ModuleSet {
        self.modules
            .iter()
            .filter(|module| rules.iter().any(|rule| rule.matches(module)))
            .cloned()
            .collect()
    }

    /// Render the set as a delimited listing, the form `jlink --add-modules`
    /// expects.
    pub fn to_listing(&self) -> String {
        self.modules
            .iter()
            .map(ModuleName::as_str)
            .collect::<Vec<_>>()
            .join(&LISTING_DELIMITER.to_string())
    }
}

impl FromIterator<ModuleName> for ModuleSet {
    fn from_iter<T: IntoIterator<Item = ModuleName>>(iter: T) -> Self {
        Self {
            modules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ModuleSet {
    type Item = &'a ModuleName;
    type IntoIter = std::collections::btree_set::Iter<'a, ModuleName>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}

impl fmt::Display for ModuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_listing())
    }
}
