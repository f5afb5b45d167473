//! # Output Configuration
//!
//! Controls how the CLI renders its progress and result lines: with emoji
//! and colors on capable terminals, with plain bracketed markers elsewhere.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

use console::style;

use crate::modules::ModuleSet;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and the `--color`
    /// flag value (`always`, `never` or `auto`).
    ///
    /// `always` overrides `NO_COLOR`; `auto` falls back to environment and
    /// TTY detection.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of NO_COLOR, even empty, disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Configuration with colors always enabled.
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Configuration with colors always disabled.
    pub fn without_color() -> Self {
        Self { use_color: false }
    }

    /// Render a module set one module per line, indented, dimming modules
    /// that were excluded.
    pub fn module_lines(&self, modules: &ModuleSet, excluded: bool) -> Vec<String> {
        modules
            .iter()
            .map(|module| {
                let line = if excluded {
                    format!("   - {}", module)
                } else {
                    format!("   + {}", module)
                };
                if self.use_color && excluded {
                    style(line).dim().to_string()
                } else if self.use_color {
                    style(line).green().to_string()
                } else {
                    line
                }
            })
            .collect()
    }
}

/// Returns the emoji when colors are enabled and the plain marker otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}
