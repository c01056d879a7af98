//! Property-based tests for token and path generation.
//!
//! These tests verify:
//! - Token length is exactly twice the bytes consumed, for any yield
//! - Token output stays inside the declared alphabet
//! - Request paths are injective over tokens and free of `.`/`:` segments

#![cfg(test)]

use proptest::prelude::*;

use crate::constants::{REQUEST_PATH_PREFIX, TOKEN_BYTES};
use crate::protocol::token::{handle_token, EntropyError, EntropySource};
use crate::protocol::request_path;

/// Entropy source yielding `available` bytes before running dry.
struct LimitedEntropy {
    available: usize,
    counter: u8,
}

impl EntropySource for LimitedEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, EntropyError> {
        if self.available == 0 {
            return Err(EntropyError::Exhausted);
        }
        let n = self.available.min(buf.len());
        for slot in &mut buf[..n] {
            self.counter = self.counter.wrapping_add(37);
            *slot = self.counter;
        }
        self.available -= n;
        Ok(n)
    }
}

proptest! {
    #[test]
    fn token_length_is_twice_bytes_consumed(available in 1usize..=64) {
        let consumed = available.min(TOKEN_BYTES);
        let token = handle_token(&mut LimitedEntropy { available, counter: 0 });
        prop_assert_eq!(token.len(), consumed * 2);
    }

    #[test]
    fn token_chars_stay_in_alphabet(available in 1usize..=64, counter in any::<u8>()) {
        let token = handle_token(&mut LimitedEntropy { available, counter });
        prop_assert!(token.chars().all(|c| ('A'..='P').contains(&c)));
    }

    #[test]
    fn paths_are_injective_over_tokens(
        a in "[A-P]{1,64}",
        b in "[A-P]{1,64}",
    ) {
        let pa = request_path(":1.42", &a);
        let pb = request_path(":1.42", &b);
        prop_assert_eq!(a == b, pa == pb);
    }

    #[test]
    fn sanitized_identity_has_no_dots_or_colons(name in ":[0-9]{1,3}\\.[0-9]{1,3}") {
        let path = request_path(&name, "TOK");
        let segment = path
            .strip_prefix(REQUEST_PATH_PREFIX)
            .unwrap()
            .trim_start_matches('/')
            .split('/')
            .next()
            .unwrap()
            .to_string();
        prop_assert!(!segment.contains('.'));
        prop_assert!(!segment.contains(':'));
    }
}
