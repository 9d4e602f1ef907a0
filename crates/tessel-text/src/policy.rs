#![forbid(unsafe_code)]

//! Environment-driven text policy.
//!
//! Collects the break strictness, word-break policy, tab size, and CJK width
//! choice a host would otherwise thread through by hand. Decisions are
//! deterministic given the environment.

use tracing::debug;

use crate::breaks::{BreakOptions, LineBreak, WordBreak};
use crate::layout::{CellMetrics, LayoutParams};

/// Environment variable with the tab stop interval in cells.
const ENV_TAB_SIZE: &str = "TESSEL_TAB_SIZE";
/// Environment variable with the line-break strictness
/// (`normal`, `loose`, `strict`, `anywhere`).
const ENV_LINE_BREAK: &str = "TESSEL_LINE_BREAK";
/// Environment variable with the word-break policy
/// (`normal`, `break-all`, `keep-all`).
const ENV_WORD_BREAK: &str = "TESSEL_WORD_BREAK";
/// Environment variable to treat ambiguous-width codepoints as wide
/// (`1/0/true/false`).
const ENV_CJK_WIDTH: &str = "TESSEL_CJK_WIDTH";

/// Default tab stop interval.
pub const DEFAULT_TAB_SIZE: i32 = 8;

/// Text handling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPolicy {
    /// Tab stop interval in cells.
    pub tab_size: i32,
    pub line_break: LineBreak,
    pub word_break: WordBreak,
    /// Whether East Asian ambiguous-width codepoints take two cells.
    pub cjk_width: bool,
}

impl Default for TextPolicy {
    fn default() -> Self {
        Self {
            tab_size: DEFAULT_TAB_SIZE,
            line_break: LineBreak::Normal,
            word_break: WordBreak::Normal,
            cjk_width: false,
        }
    }
}

impl TextPolicy {
    /// Detect policy from the process environment.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Detect policy using a custom environment lookup (for tests).
    ///
    /// Unset or unparsable values keep their defaults.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut policy = Self::default();
        if let Some(size) = get_env(ENV_TAB_SIZE).and_then(|v| v.trim().parse::<i32>().ok()) {
            policy.tab_size = size;
        }
        if let Some(lb) = get_env(ENV_LINE_BREAK).and_then(|v| LineBreak::parse(&v)) {
            policy.line_break = lb;
        }
        if let Some(wb) = get_env(ENV_WORD_BREAK).and_then(|v| WordBreak::parse(&v)) {
            policy.word_break = wb;
        }
        if let Some(cjk) = env_override_bool(&get_env, ENV_CJK_WIDTH) {
            policy.cjk_width = cjk;
        }
        debug!(
            tab_size = policy.tab_size,
            line_break = policy.line_break.as_str(),
            word_break = policy.word_break.as_str(),
            cjk_width = policy.cjk_width,
            "text policy"
        );
        policy
    }

    /// Break options carrying this policy.
    #[must_use]
    pub const fn break_options(&self) -> BreakOptions {
        BreakOptions::new()
            .line_break(self.line_break)
            .word_break(self.word_break)
    }

    /// 1x1 cells, wide ambiguous codepoints per `cjk_width`.
    #[must_use]
    pub fn cell_metrics(&self) -> CellMetrics {
        CellMetrics {
            ambiguous_wide: self.cjk_width,
            ..CellMetrics::default()
        }
    }

    /// Layout parameters with this policy's metrics and tab size.
    #[must_use]
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams::new()
            .metrics(self.cell_metrics())
            .tab_size(self.tab_size)
    }

    /// Serialize policy to JSON (for diagnostics logs).
    #[must_use]
    pub fn to_json(&self) -> String {
        format!(
            r#"{{"tab_size":{},"line_break":"{}","word_break":"{}","cjk_width":{}}}"#,
            self.tab_size,
            self.line_break.as_str(),
            self.word_break.as_str(),
            self.cjk_width
        )
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_override_bool<F>(get_env: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    get_env(key).and_then(|value| parse_bool(&value))
}
