//! Blocking portal client.
//!
//! [`PortalClient`] owns the session bus connection and drives the whole
//! open-file flow: subscribe to the predicted handle path, send `OpenFile`,
//! rebind to the authoritative path from the reply if it differs, wait for
//! the `Response` signal, and resolve the returned URI to a native path.
//! The public API blocks the calling thread; internally the flow runs as
//! async code on a private current-thread runtime.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use futures_util::StreamExt;
use tracing::{debug, trace};
use zbus::fdo::DBusProxy;
use zbus::message::Type as MessageType;
use zbus::zvariant::{ObjectPath, Value};
use zbus::{Connection, MessageStream};

use crate::constants::{
    FILE_CHOOSER_INTERFACE, OPEN_FILE_MEMBER, PORTAL_DESTINATION, PORTAL_OBJECT_PATH,
    REQUEST_INTERFACE, RESPONSE_MEMBER, WINDOW_IDENTIFIER_NONE,
};
use crate::error::{Error, Result};
use crate::protocol::{
    handle_token, read_response, request_path, to_local_path, DialogResponse, OpenFileOptions,
    OpenFileParams, OsEntropy, ResponseSubscription,
};

/// Outcome of an open-file dialog.
///
/// Cancellation is a successful outcome, not an error: the protocol ran to
/// completion and the user chose nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user selected a file; owned native path, independent of any
    /// bus message lifetime.
    Selected(PathBuf),
    /// The user dismissed the dialog.
    Cancelled,
}

/// Client for the desktop portal file chooser.
///
/// One dialog call may be in flight at a time; the type is not `Sync` and
/// each call blocks until the dialog concludes. Dropping the client tears
/// down the bus connection.
pub struct PortalClient {
    runtime: tokio::runtime::Runtime,
    conn: Connection,
    unique_name: String,
    last_error: RefCell<Option<String>>,
}

impl PortalClient {
    /// Connect to the session bus and capture the connection's unique name.
    pub fn new() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let conn = runtime.block_on(Connection::session())?;
        let unique_name = conn
            .unique_name()
            .ok_or(Error::MissingUniqueName)?
            .to_string();
        debug!(unique_name = %unique_name, "connected to session bus");
        Ok(Self {
            runtime,
            conn,
            unique_name,
            last_error: RefCell::new(None),
        })
    }

    /// Open a single-file dialog and block until the user answers.
    ///
    /// Every exit path — selection, cancellation, error, timeout — removes
    /// the response subscription before returning. Failures are also
    /// recorded in the diagnostic slot readable via [`Self::last_error`].
    pub fn open_file(&self, options: &OpenFileOptions) -> Result<Outcome> {
        let result = self.runtime.block_on(self.open_file_flow(options));
        if let Err(error) = &result {
            self.last_error.replace(Some(error.to_string()));
        }
        result
    }

    /// Most recent failure diagnostic, if any.
    ///
    /// The slot is never cleared by a successful call; use
    /// [`Self::clear_error`] once the diagnostic has been consumed.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.borrow().clone()
    }

    /// Clear the failure diagnostic slot.
    pub fn clear_error(&self) {
        self.last_error.replace(None);
    }

    async fn open_file_flow(&self, options: &OpenFileOptions) -> Result<Outcome> {
        let proxy = DBusProxy::new(&self.conn).await?;
        let mut subscription = ResponseSubscription::new(proxy, self.unique_name.clone());

        let result = self.drive_dialog(&mut subscription, options).await;
        // Cleanup runs on success, cancellation and every error path alike.
        subscription.unsubscribe().await;
        result
    }

    async fn drive_dialog(
        &self,
        subscription: &mut ResponseSubscription<DBusProxy<'static>>,
        options: &OpenFileOptions,
    ) -> Result<Outcome> {
        let token = handle_token(&mut OsEntropy);
        let predicted = request_path(&self.unique_name, &token);
        debug!(path = %predicted, "subscribing to predicted handle path");
        subscription.subscribe(&predicted).await?;

        // Opened before the request is sent, so a response racing the
        // method reply is queued rather than lost.
        let mut stream = MessageStream::from(&self.conn);

        let params = OpenFileParams::single(token, &options.filters)?;
        let reply = self
            .conn
            .call_method(
                Some(PORTAL_DESTINATION),
                PORTAL_OBJECT_PATH,
                Some(FILE_CHOOSER_INTERFACE),
                OPEN_FILE_MEMBER,
                &(WINDOW_IDENTIFIER_NONE, options.title.as_str(), params),
            )
            .await?;

        let body = reply.body();
        let handle: ObjectPath<'_> = body.deserialize().map_err(|e| {
            Error::decode(format!("method reply does not carry a handle path: {e}"))
        })?;
        let handle = handle.to_string();
        if handle != predicted {
            debug!(authoritative = %handle, "rebinding to server-chosen handle path");
            subscription.subscribe(&handle).await?;
        }

        let wait = wait_for_response(&mut stream, &handle);
        let response = match options.wait_timeout {
            Some(limit) => tokio::time::timeout(limit, wait)
                .await
                .map_err(|_| Error::Timeout)??,
            None => wait.await?,
        };

        match response {
            DialogResponse::Selected(uri) => {
                let path = to_local_path(&uri)?;
                debug!(path = %path.display(), "file selected");
                Ok(Outcome::Selected(path))
            }
            DialogResponse::Cancelled => {
                debug!("dialog cancelled by the user");
                Ok(Outcome::Cancelled)
            }
        }
    }
}

/// Drain the message stream until the `Response` signal for `handle`
/// arrives, then decode it.
///
/// Non-matching traffic is skipped; a closed stream is an error. Without an
/// outer timeout this waits indefinitely, like the portal itself.
async fn wait_for_response(stream: &mut MessageStream, handle: &str) -> Result<DialogResponse> {
    loop {
        let msg = stream.next().await.ok_or(Error::ConnectionClosed)??;
        let header = msg.header();
        let matches = header.primary().msg_type() == MessageType::Signal
            && header.interface().map(|i| i.as_str()) == Some(REQUEST_INTERFACE)
            && header.member().map(|m| m.as_str()) == Some(RESPONSE_MEMBER)
            && header.path().map(|p| p.as_str()) == Some(handle);
        if !matches {
            trace!("skipping unrelated bus message");
            continue;
        }

        let body = msg.body();
        let (code, results): (u32, HashMap<String, Value<'_>>) = body
            .deserialize()
            .map_err(|e| Error::decode(format!("malformed response signal: {e}")))?;
        return read_response(code, &results);
    }
}
