//! Centralized per-game logger
//!
//! Owned by `GameState` so there is no global logging state and parallel
//! games never interleave output. Tests can switch on in-memory capture to
//! assert on logged warnings.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};

/// Verbosity level for game output.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum VerbosityLevel {
    /// No output during the game.
    Silent = 0,
    /// Only warnings (unknown descriptors, applier failures).
    Minimal = 1,
    /// Key actions and resolutions (default).
    #[default]
    Normal = 2,
    /// All actions and state changes.
    Verbose = 3,
}

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputMode {
    /// Print to stdout/stderr (default).
    #[default]
    Stdout,
    /// Capture to an in-memory buffer (tests).
    Memory,
    /// Both.
    Both,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct GameLogger {
    verbosity: VerbosityLevel,
    mode: OutputMode,
    buffer: RefCell<Vec<LogEntry>>,
}

impl GameLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            ..Self::default()
        }
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn set_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn emit(&self, level: VerbosityLevel, message: &str, to_stderr: bool) {
        if self.verbosity < level {
            return;
        }
        if matches!(self.mode, OutputMode::Stdout | OutputMode::Both) {
            if to_stderr {
                eprintln!("{message}");
            } else {
                println!("{message}");
            }
        }
        if matches!(self.mode, OutputMode::Memory | OutputMode::Both) {
            self.buffer.borrow_mut().push(LogEntry {
                level,
                message: message.to_string(),
            });
        }
    }

    /// Key game actions (casts, resolutions, deaths).
    pub fn normal(&self, message: &str) {
        self.emit(VerbosityLevel::Normal, message, false);
    }

    /// Detailed state changes.
    pub fn verbose(&self, message: &str) {
        self.emit(VerbosityLevel::Verbose, message, false);
    }

    /// Internal resilience events: unknown descriptors, applier failures.
    pub fn warn(&self, message: &str) {
        self.emit(VerbosityLevel::Minimal, &format!("warning: {message}"), true);
    }

    /// Captured entries (only populated in Memory/Both modes).
    pub fn entries(&self) -> Ref<'_, Vec<LogEntry>> {
        self.buffer.borrow()
    }
}

impl Clone for GameLogger {
    fn clone(&self) -> Self {
        GameLogger {
            verbosity: self.verbosity,
            mode: self.mode,
            buffer: RefCell::new(self.buffer.borrow().clone()),
        }
    }
}

/// Conditional logging that compiles to a no-op without the
/// `verbose-logging` feature, avoiding format! allocations on hot paths.
#[macro_export]
macro_rules! log_verbose {
    ($logger:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $logger.verbose(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$logger;
        }
    };
}
