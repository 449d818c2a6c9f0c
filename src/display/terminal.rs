//! TTY detection, color support and terminal geometry

use std::io::IsTerminal;

const FALLBACK_COLUMNS: u16 = 80;

/// Determine if styled output should be used based on environment and TTY status
pub fn should_use_colors() -> bool {
    // NO_COLOR wins over everything (https://no-color.org/)
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    match std::env::var("CLICOLOR_FORCE") {
        Ok(val) if val != "0" => return true,
        _ => {}
    }

    if std::env::var("CLICOLOR").is_ok_and(|val| val == "0") {
        return false;
    }

    std::io::stdout().is_terminal()
}

/// Current terminal width in columns, 80 when unknown
pub fn columns() -> u16 {
    termimad::crossterm::terminal::size()
        .map(|(cols, _)| cols)
        .ok()
        .filter(|cols| *cols > 0)
        .unwrap_or(FALLBACK_COLUMNS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("NO_COLOR");
        std::env::remove_var("CLICOLOR_FORCE");
        std::env::remove_var("CLICOLOR");
    }

    #[test]
    #[serial]
    fn test_no_color_disables() {
        clear_env();
        std::env::set_var("NO_COLOR", "1");
        assert!(!should_use_colors());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_clicolor_force_enables() {
        clear_env();
        std::env::set_var("CLICOLOR_FORCE", "1");
        assert!(should_use_colors());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_no_color_overrides_force() {
        clear_env();
        std::env::set_var("NO_COLOR", "1");
        std::env::set_var("CLICOLOR_FORCE", "1");
        assert!(!should_use_colors());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_clicolor_zero_disables() {
        clear_env();
        std::env::set_var("CLICOLOR", "0");
        assert!(!should_use_colors());
        clear_env();
    }

    #[test]
    fn test_columns_is_positive() {
        assert!(columns() > 0);
    }
}
