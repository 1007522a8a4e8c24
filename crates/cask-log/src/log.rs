pub mod error;

use std::{
    io::Write,
    sync::{OnceLock, Mutex},
};

use core::str::FromStr;

use termcolor::{WriteColor, StandardStream, ColorChoice};

pub use termcolor::{ColorSpec, Color};

use rustc_hash::FxHashMap;

use compact_str::CompactString;

use crate::*;

use crate::fmt::SegmentSpec;

#[repr(i8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Level {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl FromStr for Level {

    type Err = ();

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("error") {
            Ok(Self::Error)
        } else if s.eq_ignore_ascii_case("warn") {
            Ok(Self::Warn)
        } else if s.eq_ignore_ascii_case("info") {
            Ok(Self::Info)
        } else if s.eq_ignore_ascii_case("debug") {
            Ok(Self::Debug)
        } else if s.eq_ignore_ascii_case("trace") {
            Ok(Self::Trace)
        } else {
            Err(())
        }
    }
}

/// Level filters parsed from a `RUST_LOG` style string: comma separated
/// entries of either `level` or `target=level`. Unknown levels are ignored.
#[derive(Debug)]
pub struct Filters {
    target_levels: FxHashMap<CompactString, Level>,
    base_level: Level,
}

impl Default for Filters {

    fn default() -> Self {
        Self {
            target_levels: FxHashMap::default(),
            base_level: Level::Error,
        }
    }
}

impl Filters {

    pub fn parse(env: &str) -> Self {
        let mut filters = Self::default();
        for arg in env.split(',') {
            let (module, level) = match arg.find('=') {
                Some(j) => (Some(arg[0..j].trim()), arg[j + 1..].trim()),
                None => (None, arg.trim()),
            };
            let Ok(level) = Level::from_str(level) else {
                continue
            };
            match module {
                Some(module) => {
                    let entry = filters.target_levels
                        .entry(CompactString::new(module))
                        .or_insert(level);
                    *entry = (*entry).min(level);
                },
                None => filters.base_level = level,
            }
        }
        filters
    }

    /// Most specific level for `target`, walking up its `::` separated path.
    pub fn target_level(&self, target: &str) -> Level {
        let mut substr = target;
        if let Some(&level) = self.target_levels.get(substr) {
            return level
        }
        while let Some(i) = substr.rfind("::") {
            substr = &substr[0..i];
            if let Some(&level) = self.target_levels.get(substr) {
                return level
            }
        }
        self.base_level
    }
}

struct Logger {
    stderr: StandardStream,
    error_fmt: LogFmt,
    warn_fmt: LogFmt,
    info_fmt: LogFmt,
    debug_fmt: LogFmt,
    trace_fmt: LogFmt,
    filters: Filters,
}

impl Logger {

    #[inline(always)]
    fn new() -> Self {
        let filters = std::env::var("RUST_LOG")
            .map(|env| Filters::parse(&env))
            .unwrap_or_default();
        Self {
            stderr: StandardStream::stderr(ColorChoice::Auto),
            error_fmt: LogFmt::labeled("ERROR", Color::Red),
            warn_fmt: LogFmt::labeled("WARN", Color::Yellow),
            info_fmt: LogFmt::labeled("INFO", Color::Green),
            debug_fmt: LogFmt::labeled("DEBUG", Color::Blue),
            trace_fmt: LogFmt::labeled("TRACE", Color::Magenta),
            filters,
        }
    }

    fn fmt_mut(&mut self, level: Level) -> &mut LogFmt {
        match level {
            Level::Error => &mut self.error_fmt,
            Level::Warn => &mut self.warn_fmt,
            Level::Info => &mut self.info_fmt,
            Level::Debug => &mut self.debug_fmt,
            Level::Trace => &mut self.trace_fmt,
        }
    }

    fn log(&mut self, target: &str, level: Level, msg: core::fmt::Arguments) -> Result<bool> {
        if self.filters.target_level(target) < level {
            return Ok(false)
        }
        let fmt = match level {
            Level::Error => &self.error_fmt,
            Level::Warn => &self.warn_fmt,
            Level::Info => &self.info_fmt,
            Level::Debug => &self.debug_fmt,
            Level::Trace => &self.trace_fmt,
        };
        for segment in fmt {
            match segment {
                SegmentSpec::Message(log_spec) => {
                    if let Some(color_spec) = &log_spec.color_spec {
                        self.stderr.set_color(color_spec)?;
                        write!(self.stderr, "{}", msg)?;
                        self.stderr.reset()?;
                    } else {
                        write!(self.stderr, "{}", msg)?;
                    }
                },
                SegmentSpec::Text(text, log_spec) => {
                    if let Some(color_spec) = &log_spec.color_spec {
                        self.stderr.set_color(color_spec)?;
                        self.stderr.write_all(text.as_bytes())?;
                        self.stderr.reset()?;
                    } else {
                        self.stderr.write_all(text.as_bytes())?;
                    }
                },
            }
        }
        self.stderr.write_all(b"\n")?;
        Ok(true)
    }
}

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

/// Installs the process wide logger, reading `RUST_LOG`. Later calls are
/// no-ops.
pub fn init() {
    LOGGER.get_or_init(|| Mutex::new(Logger::new()));
}

/// Replaces the output format of `level`. Returns `false` when the logger has
/// not been initialized.
pub fn set_fmt(level: Level, f: impl FnOnce(&mut LogFmtBuilder)) -> Result<bool> {
    let Some(logger) = LOGGER.get() else {
        return Ok(false)
    };
    let mut logger = logger.lock().map_err(|_| LogError::Poisoned)?;
    let mut builder = LogFmtBuilder::new(logger.fmt_mut(level));
    f(&mut builder);
    Ok(true)
}

/// Writes one record. Records logged before [`init`] are dropped and report
/// `Ok(false)`.
#[inline(always)]
pub fn log(target: &str, level: Level, args: core::fmt::Arguments) -> Result<bool> {
    let Some(logger) = LOGGER.get() else {
        return Ok(false)
    };
    logger
        .lock()
        .map_err(|_| LogError::Poisoned)?
        .log(target, level, args)
}

#[macro_export]
macro_rules! error {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::Level::Error, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! warn {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::Level::Warn, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! info {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::Level::Info, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! debug {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::Level::Debug, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! trace {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::Level::Trace, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}
