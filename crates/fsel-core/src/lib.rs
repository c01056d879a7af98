//! fsel-core: file-chooser portal protocol engine.
//!
//! This crate provides:
//! - A blocking client for the desktop portal's "open one file" flow
//! - Handle token and request path generation
//! - Options dictionary encoding and response signal decoding
//! - Response subscription lifecycle management
//! - File URI to native path conversion
//! - Logging setup shared with the CLI
//!
//! ```no_run
//! use fsel_core::{OpenFileOptions, PortalClient};
//!
//! let client = PortalClient::new()?;
//! match client.open_file(&OpenFileOptions::default())? {
//!     fsel_core::Outcome::Selected(path) => println!("{}", path.display()),
//!     fsel_core::Outcome::Cancelled => {}
//! }
//! # Ok::<(), fsel_core::Error>(())
//! ```

pub mod client;
pub mod constants;
pub mod error;
pub mod logging;
pub mod protocol;

pub use client::{Outcome, PortalClient};
pub use error::{Error, Result};
pub use logging::{init_logging, LogFormat};
pub use protocol::{FilterSpec, OpenFileOptions};
