#[macro_use]

mod log;
pub mod fmt;

pub use log::error::LogError;
pub use fmt::{LogFmt, LogFmtBuilder, LogSpec};

pub type Result<T> = core::result::Result<T, LogError>;

pub use log::*;
