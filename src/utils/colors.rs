/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Streak color:
/// 0 → grey
/// a week or more → magenta
/// otherwise → green
pub fn color_for_streak(value: u32) -> &'static str {
    match value {
        0 => GREY,
        v if v >= 7 => MAGENTA,
        _ => GREEN,
    }
}

/// Grey for archived habits, reset otherwise.
pub fn color_for_active(active: bool) -> &'static str {
    if active { RESET } else { GREY }
}

/// Paint `value` with `color`, resetting afterwards.
pub fn paint(color: &str, value: &str) -> String {
    format!("{color}{value}{RESET}")
}
