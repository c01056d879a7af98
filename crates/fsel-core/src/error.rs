//! Error types for fsel-core.

use thiserror::Error;

/// Main error type for portal dialog operations.
///
/// User cancellation is deliberately *not* an error; it is reported as
/// [`crate::Outcome::Cancelled`].
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from underlying system calls (runtime construction, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level bus error: connection establishment, method call,
    /// or message stream failure.
    #[error("bus error: {0}")]
    Bus(#[from] zbus::Error),

    /// Bus management error while adding or removing a match rule.
    #[error("bus management error: {0}")]
    BusManagement(#[from] zbus::fdo::Error),

    /// The connection did not report a unique bus name.
    #[error("unable to get the unique name of the bus connection")]
    MissingUniqueName,

    /// Structural decode failure: the reply or response signal did not have
    /// the expected shape at some nesting level.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// A caller-supplied filter spec was malformed.
    #[error("invalid filter spec: {message}")]
    InvalidFilter { message: String },

    /// The portal answered with a URI that is not a local file URI.
    #[error("portal returned a URI that is not a file URI: {uri}")]
    NotFileUri { uri: String },

    /// The portal ended the interaction abnormally (response code other
    /// than selected/cancelled).
    #[error("file dialog interaction was ended abruptly (response code {code})")]
    Aborted { code: u32 },

    /// The bounded wait for the response signal expired.
    #[error("timed out waiting for the portal response")]
    Timeout,

    /// The bus connection closed while waiting for the response signal.
    #[error("connection closed while waiting for the portal response")]
    ConnectionClosed,
}

impl Error {
    /// Shorthand for a structural decode failure.
    pub(crate) fn decode(message: impl Into<String>) -> Self {
        Error::Decode {
            message: message.into(),
        }
    }
}

/// Convenience result type for portal dialog operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_decode() {
        let err = Error::decode("response signal argument is not an array");
        assert_eq!(
            err.to_string(),
            "decode error: response signal argument is not an array"
        );
    }

    #[test]
    fn error_display_aborted() {
        let err = Error::Aborted { code: 2 };
        assert_eq!(
            err.to_string(),
            "file dialog interaction was ended abruptly (response code 2)"
        );
    }

    #[test]
    fn error_display_not_file_uri() {
        let err = Error::NotFileUri {
            uri: "http://example/a".into(),
        };
        assert_eq!(
            err.to_string(),
            "portal returned a URI that is not a file URI: http://example/a"
        );
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
