//! Predicted request handle paths.
//!
//! The handle path of an in-flight portal request is derived from our own
//! unique bus name and the handle token. The server's method reply carries
//! the authoritative path, which may differ; this prediction exists so the
//! response subscription can be registered before the request is sent.

use crate::constants::REQUEST_PATH_PREFIX;

/// Build the predicted handle path for `token`.
///
/// The leading `:` of the bus-assigned unique name is stripped and every
/// `.` is replaced with `_`, since object paths allow neither.
pub fn request_path(unique_name: &str, token: &str) -> String {
    let sender = unique_name.strip_prefix(':').unwrap_or(unique_name);

    let mut path =
        String::with_capacity(REQUEST_PATH_PREFIX.len() + 1 + sender.len() + 1 + token.len());
    path.push_str(REQUEST_PATH_PREFIX);
    path.push('/');
    for ch in sender.chars() {
        path.push(if ch == '.' { '_' } else { ch });
    }
    path.push('/');
    path.push_str(token);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colon_stripped_and_dots_replaced() {
        let path = request_path(":1.42", "TOKEN");
        assert_eq!(
            path,
            "/org/freedesktop/portal/desktop/request/1_42/TOKEN"
        );
    }

    #[test]
    fn name_without_colon_is_accepted() {
        let path = request_path("1.42", "TOKEN");
        assert!(path.ends_with("/1_42/TOKEN"));
    }

    #[test]
    fn token_is_final_segment_verbatim() {
        let path = request_path(":1.7", "ABCDEFGH");
        assert_eq!(path.rsplit('/').next(), Some("ABCDEFGH"));
    }

    #[test]
    fn distinct_tokens_give_distinct_paths() {
        let a = request_path(":1.42", "AAAA");
        let b = request_path(":1.42", "BBBB");
        assert_ne!(a, b);
    }

    #[test]
    fn capacity_arithmetic_is_exact() {
        let path = request_path(":1.42", "TOK");
        assert_eq!(path.len(), path.capacity());
    }
}
