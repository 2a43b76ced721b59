// ============================================================================
// kako-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: Banner and Message Styling
//
// Helpers return styled strings rather than printing, so the prompt loop can
// write them to any `Write` sink. Styling is dropped automatically when the
// output is not a terminal or colors are disabled.

use console::style;

/// Symbols used as line prefixes.
pub mod styling {
    pub const RESULT_PREFIX: &str = "> ";
    pub const SUCCESS_SYMBOL: &str = "✓";
    pub const ERROR_SYMBOL: &str = "✗";
}

pub const BANNER: &str = r#"
 __  __     ______     __  __     ______
/\ \/ /    /\  __ \   /\ \/ /    /\  __ \
\ \  _"-.  \ \  __ \  \ \  _"-.  \ \ \/\ \
 \ \_\ \_\  \ \_\ \_\  \ \_\ \_\  \ \_____\
  \/_/\/_/   \/_/\/_/   \/_/\/_/   \/_____/
"#;

/// Enables or disables colored output on both streams.
pub fn set_color(enable: bool) {
    console::set_colors_enabled(enable);
    console::set_colors_enabled_stderr(enable);
}

pub fn banner() -> String {
    style(BANNER).cyan().bold().to_string()
}

/// A result line, e.g. `> clip.mp4 found!`.
pub fn result(text: &str) -> String {
    format!("{}{}", styling::RESULT_PREFIX, style(text).bold())
}

/// A completed step.
pub fn success(text: &str) -> String {
    format!(
        "{}{} {}",
        styling::RESULT_PREFIX,
        style(styling::SUCCESS_SYMBOL).green().bold(),
        style(text).green()
    )
}

/// A rejected answer; the question is asked again.
pub fn warning(text: &str) -> String {
    style(text).yellow().to_string()
}

/// A fatal failure.
pub fn error(text: &str) -> String {
    format!(
        "{} {}",
        style(styling::ERROR_SYMBOL).for_stderr().red().bold(),
        style(text).for_stderr().red()
    )
}

/// A question awaiting an answer on the same line.
pub fn question(text: &str) -> String {
    style(text).bold().to_string()
}
