//! Portal request/response protocol engine.
//!
//! This module provides:
//! - Handle token and request path generation
//! - Options dictionary encoding for `OpenFile`
//! - Response signal decoding (dictionary handler table)
//! - Response subscription lifecycle
//! - File URI to native path conversion

mod path;
mod request;
mod response;
mod subscribe;
mod token;
mod uri;

#[cfg(test)]
mod proptest;

pub use path::request_path;
pub use request::{FileFilter, FilterSpec, OpenFileOptions};
pub use token::{handle_token, EntropyError, EntropySource, OsEntropy};
pub use uri::to_local_path;

pub(crate) use request::OpenFileParams;
pub(crate) use response::{read_response, DialogResponse};
pub(crate) use subscribe::ResponseSubscription;
