//! Protocol constants for the portal file chooser.

// =============================================================================
// Portal Service
// =============================================================================

/// Well-known bus name of the desktop portal service.
pub const PORTAL_DESTINATION: &str = "org.freedesktop.portal.Desktop";

/// Object path of the portal service.
pub const PORTAL_OBJECT_PATH: &str = "/org/freedesktop/portal/desktop";

/// File chooser portal interface.
pub const FILE_CHOOSER_INTERFACE: &str = "org.freedesktop.portal.FileChooser";

/// Method opening a single-file dialog.
pub const OPEN_FILE_MEMBER: &str = "OpenFile";

// =============================================================================
// Request Correlation
// =============================================================================

/// Interface carrying the asynchronous reply for an in-flight request.
pub const REQUEST_INTERFACE: &str = "org.freedesktop.portal.Request";

/// Signal member carrying the dialog outcome.
pub const RESPONSE_MEMBER: &str = "Response";

/// Prefix under which request handle paths are predicted, as recommended
/// by the portal documentation.
pub const REQUEST_PATH_PREFIX: &str = "/org/freedesktop/portal/desktop/request";

// =============================================================================
// Handle Tokens
// =============================================================================

/// Raw random bytes requested per handle token.
pub const TOKEN_BYTES: usize = 32;

/// Full token length in characters (two per raw byte).
pub const TOKEN_LEN: usize = TOKEN_BYTES * 2;

// =============================================================================
// Response Codes
// =============================================================================

/// The user selected a file.
pub const RESPONSE_SELECTED: u32 = 0;

/// The user dismissed the dialog.
pub const RESPONSE_CANCELLED: u32 = 1;

// =============================================================================
// Results
// =============================================================================

/// Scheme prefix required on returned URIs.
pub const FILE_URI_SCHEME: &str = "file://";

/// Default dialog title.
pub const DEFAULT_TITLE: &str = "Open File";

/// Parent window identifier sent when none is known.
pub const WINDOW_IDENTIFIER_NONE: &str = "";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_len_is_two_chars_per_byte() {
        assert_eq!(TOKEN_LEN, 2 * TOKEN_BYTES);
    }

    #[test]
    fn request_prefix_has_no_trailing_slash() {
        assert!(!REQUEST_PATH_PREFIX.ends_with('/'));
        assert!(REQUEST_PATH_PREFIX.starts_with(PORTAL_OBJECT_PATH));
    }

    #[test]
    fn response_codes_are_distinct() {
        assert_ne!(RESPONSE_SELECTED, RESPONSE_CANCELLED);
    }
}
