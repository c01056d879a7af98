//! Request encoding for the file chooser portal.
//!
//! The `OpenFile` call carries `(parent_window, title, options)` where
//! `options` is a string-keyed variant dictionary. Optional keys are omitted
//! entirely rather than sent with placeholder values: `multiple` appears
//! only for multi-select requests and `filters` only when the caller
//! supplied at least one filter.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use zbus::zvariant::{SerializeDict, Type};

use crate::constants::DEFAULT_TITLE;
use crate::error::{Error, Result};

/// Wire kind tag for a glob pattern filter entry.
const GLOB_PATTERN: u32 = 0;

/// A caller-supplied file filter: display name plus a comma-separated
/// extension spec such as `"png,jpg"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    /// Display name shown in the dialog, e.g. `"Images"`.
    pub name: String,
    /// Comma-separated extension list; every segment must be non-empty.
    pub spec: String,
}

impl FilterSpec {
    pub fn new(name: impl Into<String>, spec: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spec: spec.into(),
        }
    }
}

/// Options for a single open-file dialog call.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenFileOptions {
    /// Human-readable dialog title.
    pub title: String,
    /// Ordered filter list; empty means no `filters` key on the wire.
    pub filters: Vec<FilterSpec>,
    /// Bound on the wait for the user's response. `None` (the default)
    /// blocks indefinitely, matching the portal's own behavior.
    pub wait_timeout: Option<Duration>,
}

impl Default for OpenFileOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            filters: Vec::new(),
            wait_timeout: None,
        }
    }
}

/// One filter group on the wire: `(name, [(kind, pattern), ...])`,
/// signature `(sa(us))`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct FileFilter(String, Vec<(u32, String)>);

impl FileFilter {
    /// Split a filter spec into one glob entry per comma-separated segment.
    ///
    /// Empty segments (leading/trailing/doubled commas, or an empty spec)
    /// are rejected before anything reaches the bus.
    pub(crate) fn from_spec(filter: &FilterSpec) -> Result<Self> {
        let mut patterns = Vec::new();
        for segment in filter.spec.split(',') {
            if segment.is_empty() {
                return Err(Error::InvalidFilter {
                    message: format!("empty segment in filter spec {:?}", filter.spec),
                });
            }
            patterns.push((GLOB_PATTERN, segment.to_string()));
        }
        Ok(FileFilter(filter.name.clone(), patterns))
    }

    #[cfg(test)]
    fn parts(&self) -> (&str, &[(u32, String)]) {
        (&self.0, &self.1)
    }
}

/// The `a{sv}` options dictionary of an `OpenFile` call.
///
/// Serialization wraps each present value in one variant layer and skips
/// `None` fields, yielding exactly the keys the portal expects.
#[derive(Debug, Clone, PartialEq, SerializeDict, Type)]
#[zvariant(signature = "a{sv}")]
pub(crate) struct OpenFileParams {
    handle_token: String,
    multiple: Option<bool>,
    filters: Option<Vec<FileFilter>>,
}

impl OpenFileParams {
    /// Encode options for the single-file flow.
    pub(crate) fn single(handle_token: String, filters: &[FilterSpec]) -> Result<Self> {
        Self::build(handle_token, false, filters)
    }

    fn build(handle_token: String, multiple: bool, filters: &[FilterSpec]) -> Result<Self> {
        let filters = if filters.is_empty() {
            None
        } else {
            Some(
                filters
                    .iter()
                    .map(FileFilter::from_spec)
                    .collect::<Result<Vec<_>>>()?,
            )
        };
        Ok(Self {
            handle_token,
            // Present only when set; the portal defaults to single-select.
            multiple: multiple.then_some(true),
            filters,
        })
    }
}
