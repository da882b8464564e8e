// Leveled logger with colored output and level filtering.
//
// Deliberately small: four levels, ANSI colors on by default, and a
// disable switch so library consumers can silence it entirely.

use std::fmt;

/// ANSI escape codes used by the formatter.
mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const BRIGHT: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Log levels, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    fn color(&self) -> &'static str {
        match self {
            LogLevel::Debug => ansi::MAGENTA,
            LogLevel::Info => ansi::BLUE,
            LogLevel::Warn => ansi::YELLOW,
            LogLevel::Error => ansi::RED,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for LogLevel {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "debug" => Self::Debug,
            "info" => Self::Info,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Warn,
        }
    }
}

/// Logger configuration.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Disable logging entirely.
    pub disabled: bool,
    /// Disable ANSI color output.
    pub disable_colors: bool,
    /// Minimum level to emit.
    pub level: LogLevel,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            disable_colors: false,
            level: LogLevel::Warn,
        }
    }
}

/// The logger used throughout the library.
///
/// Warn and error go to stderr, everything else to stdout.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    config: LoggerConfig,
}

impl Logger {
    pub fn new(config: LoggerConfig) -> Self {
        Self { config }
    }

    pub fn level(&self) -> LogLevel {
        self.config.level
    }

    /// Whether a message at `level` passes the filter.
    pub fn should_publish(&self, level: LogLevel) -> bool {
        !self.config.disabled && level >= self.config.level
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.should_publish(level) {
            return;
        }

        let formatted = self.format_message(level, message);
        match level {
            LogLevel::Warn | LogLevel::Error => eprintln!("{formatted}"),
            _ => println!("{formatted}"),
        }
    }

    fn format_message(&self, level: LogLevel, message: &str) -> String {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        if self.config.disable_colors {
            format!("{} {} [FedAuth]: {}", timestamp, level.as_str(), message)
        } else {
            format!(
                "{dim}{timestamp}{reset} {color}{level}{reset} {bright}[FedAuth]:{reset} {message}",
                dim = ansi::DIM,
                reset = ansi::RESET,
                color = level.color(),
                level = level.as_str(),
                bright = ansi::BRIGHT,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!(LogLevel::from("debug"), LogLevel::Debug);
        assert_eq!(LogLevel::from("warning"), LogLevel::Warn);
        assert_eq!(LogLevel::from("error"), LogLevel::Error);
        // Unknown strings fall back to warn
        assert_eq!(LogLevel::from("verbose"), LogLevel::Warn);
    }

    #[test]
    fn test_should_publish_filters_below_level() {
        let logger = Logger::new(LoggerConfig {
            level: LogLevel::Warn,
            ..Default::default()
        });
        assert!(!logger.should_publish(LogLevel::Debug));
        assert!(!logger.should_publish(LogLevel::Info));
        assert!(logger.should_publish(LogLevel::Warn));
        assert!(logger.should_publish(LogLevel::Error));
    }

    #[test]
    fn test_disabled_logger_publishes_nothing() {
        let logger = Logger::new(LoggerConfig {
            disabled: true,
            ..Default::default()
        });
        assert!(!logger.should_publish(LogLevel::Error));
    }

    #[test]
    fn test_format_without_colors() {
        let logger = Logger::new(LoggerConfig {
            disable_colors: true,
            level: LogLevel::Debug,
            ..Default::default()
        });
        let msg = logger.format_message(LogLevel::Info, "fetching profile");
        assert!(msg.contains("INFO"));
        assert!(msg.contains("[FedAuth]:"));
        assert!(msg.contains("fetching profile"));
        assert!(!msg.contains("\x1b["));
    }

    #[test]
    fn test_format_with_colors() {
        let logger = Logger::new(LoggerConfig {
            level: LogLevel::Debug,
            ..Default::default()
        });
        let msg = logger.format_message(LogLevel::Error, "request failed");
        assert!(msg.contains("\x1b["));
        assert!(msg.contains("ERROR"));
    }

    #[test]
    fn test_default_level_is_warn() {
        let logger = Logger::default();
        assert_eq!(logger.level(), LogLevel::Warn);
    }
}
