use std::io;

// Represents errors that can occur within the platform abstraction layer.
//
// The headless platform has few ways to fail: reading its request stream, or
// the application logic reporting a fatal error while handling an event.
#[derive(Debug)]
pub enum PlatformError {
    /// Reading the request stream failed.
    Io(io::Error),
    /// The event handler reported a fatal error; the message describes it.
    EventHandlingFailed(String),
    /// A command referenced a window the platform does not know.
    InvalidHandle(String),
}

impl From<io::Error> for PlatformError {
    fn from(err: io::Error) -> Self {
        PlatformError::Io(err)
    }
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformError::Io(e) => write!(f, "Platform I/O error: {}", e),
            PlatformError::EventHandlingFailed(s) => write!(f, "Event Handling Failed: {}", s),
            PlatformError::InvalidHandle(s) => write!(f, "Invalid Handle: {}", s),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlatformError::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// A specialized `Result` type for platform layer operations.
pub type Result<T> = std::result::Result<T, PlatformError>;
