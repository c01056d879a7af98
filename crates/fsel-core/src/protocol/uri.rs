//! URI-to-path conversion.

use std::path::PathBuf;

use crate::constants::FILE_URI_SCHEME;
use crate::error::{Error, Result};

/// Convert a portal-returned URI into an owned native path.
///
/// The URI must start with the literal `file://` scheme; anything else is an
/// error with no fallback interpretation. The remainder is copied verbatim —
/// embedded spaces or escape sequences are not decoded, matching what the
/// portal actually hands back for local files.
pub fn to_local_path(uri: &str) -> Result<PathBuf> {
    match uri.strip_prefix(FILE_URI_SCHEME) {
        Some(rest) => Ok(PathBuf::from(rest)),
        None => Err(Error::NotFileUri {
            uri: uri.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn file_uri_resolves_to_path() {
        assert_eq!(
            to_local_path("file:///tmp/a.txt").unwrap(),
            Path::new("/tmp/a.txt")
        );
    }

    #[test]
    fn embedded_spaces_pass_through_unchanged() {
        assert_eq!(
            to_local_path("file:///a/b c").unwrap(),
            Path::new("/a/b c")
        );
    }

    #[test]
    fn non_file_scheme_is_rejected() {
        let err = to_local_path("http://example/a").unwrap_err();
        assert!(matches!(err, Error::NotFileUri { .. }));
    }

    #[test]
    fn scheme_comparison_is_exact() {
        // A prefix of the scheme is not enough.
        assert!(to_local_path("file:/tmp/a").is_err());
        assert!(to_local_path("File:///tmp/a").is_err());
    }
}
