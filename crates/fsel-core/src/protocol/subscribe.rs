//! Response signal subscription lifecycle.
//!
//! At most one match rule is registered per in-flight dialog call. The rule
//! is first bound to the predicted handle path; if the method reply names a
//! different (authoritative) path, rebinding replaces the old registration
//! before the correlation loop starts reading.

use async_trait::async_trait;
use tracing::debug;
use zbus::fdo::DBusProxy;
use zbus::message::Type as MessageType;
use zbus::MatchRule;

use crate::constants::{PORTAL_DESTINATION, REQUEST_INTERFACE, RESPONSE_MEMBER};
use crate::error::Result;

/// Bus-side match rule registration.
///
/// Seam between the subscription state machine and the bus, so the
/// rebind/cleanup behavior is testable without a session bus.
#[async_trait]
pub(crate) trait MatchRegistrar {
    async fn add_rule(&self, rule: MatchRule<'static>) -> Result<()>;
    async fn remove_rule(&self, rule: MatchRule<'static>) -> Result<()>;
}

#[async_trait]
impl MatchRegistrar for DBusProxy<'static> {
    async fn add_rule(&self, rule: MatchRule<'static>) -> Result<()> {
        self.add_match_rule(rule).await?;
        Ok(())
    }

    async fn remove_rule(&self, rule: MatchRule<'static>) -> Result<()> {
        self.remove_match_rule(rule).await?;
        Ok(())
    }
}

/// Build the match rule for the `Response` signal of one request handle.
fn response_rule(handle_path: &str, destination: &str) -> Result<MatchRule<'static>> {
    let rule = MatchRule::builder()
        .msg_type(MessageType::Signal)
        .sender(PORTAL_DESTINATION)?
        .path(handle_path.to_owned())?
        .interface(REQUEST_INTERFACE)?
        .member(RESPONSE_MEMBER)?
        .destination(destination.to_owned())?
        .build();
    Ok(rule)
}

/// Two-state subscription manager: unsubscribed, or subscribed to exactly
/// one handle path.
pub(crate) struct ResponseSubscription<R> {
    registrar: R,
    destination: String,
    active: Option<MatchRule<'static>>,
}

impl<R: MatchRegistrar> ResponseSubscription<R> {
    /// `destination` is this connection's unique bus name; the portal
    /// addresses the response signal to it.
    pub(crate) fn new(registrar: R, destination: String) -> Self {
        Self {
            registrar,
            destination,
            active: None,
        }
    }

    /// Register for responses on `handle_path`, replacing any previous
    /// registration. On registration failure the manager ends up
    /// unsubscribed and the error surfaces to the caller.
    pub(crate) async fn subscribe(&mut self, handle_path: &str) -> Result<()> {
        if self.active.is_some() {
            self.unsubscribe().await;
        }
        let rule = response_rule(handle_path, &self.destination)?;
        self.registrar.add_rule(rule.clone()).await?;
        self.active = Some(rule);
        Ok(())
    }

    /// Remove the active registration, if any.
    ///
    /// Removal errors are swallowed: this always runs during teardown and
    /// must not mask the primary outcome of the call.
    pub(crate) async fn unsubscribe(&mut self) {
        if let Some(rule) = self.active.take() {
            if let Err(error) = self.registrar.remove_rule(rule).await {
                debug!(%error, "ignoring match rule removal failure during cleanup");
            }
        }
    }

    #[cfg(test)]
    fn is_subscribed(&self) -> bool {
        self.active.is_some()
    }
}
