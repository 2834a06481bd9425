//! Terminal logging for the `postmeta` binary, built on the `log` facade and
//! `simplelog`.

use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

/// Maps the number of `-v` flags to a level: warnings by default, then info,
/// debug and trace.
pub fn level_for_verbosity(verbosity: u64) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the global terminal logger. Messages go to stderr so stdout stays
/// clean for reports.
pub fn init(verbosity: u64) -> Result<(), log::SetLoggerError> {
    TermLogger::init(
        level_for_verbosity(verbosity),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
}

/// Initializes a debug-level logger for tests. Safe to call repeatedly; later
/// calls are no-ops.
pub fn initialize_for_tests() {
    let _ = init(2);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for_verbosity(0), LevelFilter::Warn);
        assert_eq!(level_for_verbosity(1), LevelFilter::Info);
        assert_eq!(level_for_verbosity(2), LevelFilter::Debug);
        assert_eq!(level_for_verbosity(7), LevelFilter::Trace);
    }

    #[test]
    fn test_initialize_twice() {
        initialize_for_tests();
        initialize_for_tests();
    }

    #[test]
    fn test_second_init_reports_error() {
        initialize_for_tests();
        assert!(init(0).is_err());
    }
}
