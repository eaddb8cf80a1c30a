use std::fmt;

/// Host-side driver failures, distinct from `plorth_core::Error` (the
/// language-level value that flows through `Context`). `main` matches on
/// this to choose an exit code: `Usage` is EX_USAGE (64), everything else
/// is 1.
#[derive(Debug)]
pub enum DriverError {
    Usage(String),
    Io(std::io::Error),
    Uncaught(plorth_core::Error),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Usage(message) => write!(f, "{message}"),
            DriverError::Io(e) => write!(f, "{e}"),
            DriverError::Uncaught(err) => {
                match &err.position {
                    Some(position) if position.filename.is_some() => {
                        write!(f, "{position}:{} - {}", err.kind, err.message)
                    }
                    _ => write!(f, "{} - {}", err.kind, err.message),
                }
            }
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriverError::Io(e) => Some(e),
            DriverError::Uncaught(e) => Some(e),
            DriverError::Usage(_) => None,
        }
    }
}

impl From<std::io::Error> for DriverError {
    fn from(e: std::io::Error) -> Self {
        DriverError::Io(e)
    }
}
