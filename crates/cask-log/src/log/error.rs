#[derive(Debug)]
pub enum LogError {
    Poisoned,
    IoError(std::io::Error),
}

impl core::fmt::Display for LogError {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Poisoned => write!(f, "logger lock poisoned"),
            Self::IoError(_) => write!(f, "IO error"),
        }
    }
}

impl core::error::Error for LogError {

    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Poisoned => None,
            Self::IoError(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for LogError {

    fn from(value: std::io::Error) -> Self {
        Self::IoError(value)
    }
}
