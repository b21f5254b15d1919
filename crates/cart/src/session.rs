//! Cart edit session.
//!
//! A [`CartSession`] is what a view owns: it holds the current [`CartState`],
//! replaces it wholesale whenever the backend supplies a new cart, forwards
//! shopper edits to it, and hands commits to a [`CartSaver`].
//!
//! Everything runs to completion on the caller's event loop. A cart
//! replacement always wins over local edits made before it.

use tracing::{info, instrument, warn};

use crate::config::CartConfig;
use crate::error::{CartError, Result};
use crate::model::{CartLineView, CartState, CommitPayload, QuantityChange};
use crate::raw::RawCart;
use crate::save::CartSaver;

/// View-owned cart lifecycle.
#[derive(Debug, Clone, Default)]
pub struct CartSession {
    config: CartConfig,
    state: Option<CartState>,
    backend_empty: bool,
}

impl CartSession {
    /// Create a session with no cart loaded.
    #[must_use]
    pub const fn new(config: CartConfig) -> Self {
        Self {
            config,
            state: None,
            backend_empty: false,
        }
    }

    /// Load or replace the cart from the backend.
    ///
    /// The previous state, including any unsaved edits, is discarded. On
    /// error the previous state is kept.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Validation`] if the raw cart is malformed.
    #[instrument(skip_all, fields(cart_id = ?raw.id))]
    pub fn replace_cart(&mut self, raw: &RawCart) -> Result<&CartState> {
        let state = CartState::normalize(raw, &self.config)?;
        if self.state.as_ref().is_some_and(CartState::is_dirty) {
            info!("Discarding unsaved cart edits");
        }
        self.backend_empty = raw.is_empty();
        Ok(&*self.state.insert(state))
    }

    /// Add one unit to a line.
    ///
    /// # Errors
    ///
    /// See [`CartState::change_quantity`]; also [`CartError::NoCart`].
    pub fn increment(&mut self, line_item_id: &str) -> Result<&CartLineView> {
        self.change_quantity(line_item_id, QuantityChange::Increment)
    }

    /// Remove one unit from a line.
    ///
    /// # Errors
    ///
    /// See [`CartState::change_quantity`]; also [`CartError::NoCart`].
    pub fn decrement(&mut self, line_item_id: &str) -> Result<&CartLineView> {
        self.change_quantity(line_item_id, QuantityChange::Decrement)
    }

    /// Apply a single-step quantity change.
    ///
    /// # Errors
    ///
    /// See [`CartState::change_quantity`]; also [`CartError::NoCart`].
    pub fn change_quantity(
        &mut self,
        line_item_id: &str,
        change: QuantityChange,
    ) -> Result<&CartLineView> {
        self.state_mut()?.change_quantity(line_item_id, change)
    }

    /// Zero a line until the next commit.
    ///
    /// # Errors
    ///
    /// See [`CartState::delete_line`]; also [`CartError::NoCart`].
    pub fn delete_line(&mut self, line_item_id: &str) -> Result<&CartLineView> {
        self.state_mut()?.delete_line(line_item_id)
    }

    /// Commit local edits and hand them to `saver`.
    ///
    /// The session stays dirty after a successful save; it becomes clean once
    /// the backend's updated cart is passed to [`Self::replace_cart`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NoCart`] if nothing is loaded, or
    /// [`CartError::Save`] if the saver fails.
    #[instrument(skip_all)]
    pub async fn update_cart<S: CartSaver>(&self, saver: &S) -> Result<CommitPayload> {
        let payload = self.state.as_ref().ok_or(CartError::NoCart)?.commit();

        match saver.save(&payload).await {
            Ok(()) => {
                info!(lines = payload.len(), "Cart update submitted");
                Ok(payload)
            }
            Err(e) => {
                warn!(error = %e, "Cart update failed");
                Err(e.into())
            }
        }
    }

    /// Current view model, if a cart has been loaded.
    #[must_use]
    pub const fn state(&self) -> Option<&CartState> {
        self.state.as_ref()
    }

    /// Whether the "Update Cart" action should be offered.
    #[must_use]
    pub fn show_update_action(&self) -> bool {
        self.state.as_ref().is_some_and(CartState::is_dirty)
    }

    /// Whether the last cart from the backend had no line items.
    ///
    /// Lines deleted locally still render as placeholders, so this only
    /// turns true after a replacement.
    #[must_use]
    pub const fn shows_empty_message(&self) -> bool {
        self.backend_empty
    }

    /// Configuration used for normalization.
    #[must_use]
    pub const fn config(&self) -> &CartConfig {
        &self.config
    }

    fn state_mut(&mut self) -> Result<&mut CartState> {
        self.state.as_mut().ok_or(CartError::NoCart)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cartkit_core::Price;

    use super::*;
    use crate::raw::RawLineItem;
    use crate::save::{RecordingSaver, SaveError};

    struct FailingSaver;

    impl CartSaver for FailingSaver {
        async fn save(&self, _payload: &CommitPayload) -> std::result::Result<(), SaveError> {
            Err(SaveError::new("backend unavailable"))
        }
    }

    fn raw_cart() -> RawCart {
        RawCart::new(
            vec![
                RawLineItem::new("A", 2, "Shirt", "vA", "10"),
                RawLineItem::new("B", 1, "Socks", "vB", "5"),
            ],
            "25",
        )
    }

    fn loaded() -> CartSession {
        let mut session = CartSession::default();
        session.replace_cart(&raw_cart()).unwrap();
        session
    }

    #[test]
    fn test_edits_require_a_cart() {
        let mut session = CartSession::default();
        assert!(matches!(session.increment("A"), Err(CartError::NoCart)));
        assert!(matches!(session.delete_line("A"), Err(CartError::NoCart)));
        assert!(session.state().is_none());
        assert!(!session.show_update_action());
    }

    #[test]
    fn test_update_action_follows_dirty_flag() {
        let mut session = loaded();
        assert!(!session.show_update_action());
        session.increment("A").unwrap();
        assert!(session.show_update_action());
    }

    #[test]
    fn test_replace_discards_local_edits() {
        let mut session = loaded();
        session.increment("A").unwrap();
        session.delete_line("B").unwrap();

        let state = session.replace_cart(&raw_cart()).unwrap();
        assert!(!state.is_dirty());
        assert_eq!(state.line("A").unwrap().quantity(), 2);
        assert_eq!(state.total_price(), Price::new(25));
    }

    #[test]
    fn test_replace_is_idempotent() {
        let mut session = loaded();
        let first = session.state().cloned().unwrap();
        session.replace_cart(&raw_cart()).unwrap();
        assert_eq!(session.state(), Some(&first));
    }

    #[test]
    fn test_failed_replace_keeps_previous_state() {
        let mut session = loaded();
        session.increment("A").unwrap();

        let mut bad = raw_cart();
        bad.total_price = "oops".into();
        assert!(session.replace_cart(&bad).is_err());
        assert_eq!(session.state().unwrap().line("A").unwrap().quantity(), 3);
    }

    #[test]
    fn test_empty_message_only_after_replacement() {
        let mut session = loaded();
        session.delete_line("A").unwrap();
        session.delete_line("B").unwrap();
        assert!(!session.shows_empty_message());

        session.replace_cart(&RawCart::new(vec![], "0")).unwrap();
        assert!(session.shows_empty_message());
    }

    #[tokio::test]
    async fn test_update_cart_hands_payload_to_saver() {
        let mut session = loaded();
        session.increment("A").unwrap();
        session.delete_line("B").unwrap();

        let saver = RecordingSaver::new();
        let payload = session.update_cart(&saver).await.unwrap();

        assert_eq!(saver.last(), Some(payload.clone()));
        let lines: Vec<(&str, i64)> = payload.iter().map(|u| (u.id.as_str(), u.quantity)).collect();
        assert_eq!(lines, [("A", 3), ("B", 0)]);
        // stays dirty until the backend cart comes back
        assert!(session.show_update_action());
    }

    #[tokio::test]
    async fn test_update_cart_reports_save_failure() {
        let session = loaded();
        let err = session.update_cart(&FailingSaver).await.unwrap_err();
        assert!(matches!(err, CartError::Save(_)));
        assert!(err.to_string().contains("backend unavailable"));
    }

    #[tokio::test]
    async fn test_update_cart_without_cart() {
        let session = CartSession::default();
        let saver = RecordingSaver::new();
        assert!(matches!(session.update_cart(&saver).await, Err(CartError::NoCart)));
        assert!(saver.saved().is_empty());
    }
}
