//! Cart view-model derivation and local edits.
//!
//! A [`CartState`] is derived from a [`RawCart`] by [`CartState::normalize`]
//! and then mutated in place by quantity changes and deletions until the
//! shopper commits. Totals are adjusted incrementally on every edit rather
//! than recomputed from the line items.
//!
//! ```
//! use cartkit::{CartConfig, CartState, QuantityChange, RawCart, RawLineItem};
//!
//! let raw = RawCart::new(
//!     vec![
//!         RawLineItem::new("A", 2, "Shirt", "vA", "10"),
//!         RawLineItem::new("B", 1, "Socks", "vB", "5"),
//!     ],
//!     "25",
//! );
//!
//! let mut state = CartState::normalize(&raw, &CartConfig::default()).unwrap();
//! state.change_quantity("A", QuantityChange::Increment).unwrap();
//! state.delete_line("B").unwrap();
//!
//! assert_eq!(state.total_price().amount(), 30);
//! assert_eq!(state.total_quantity(), 3);
//! assert!(state.is_dirty());
//! ```

use cartkit_core::{LineItemId, Price, PriceScale, VariantId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::CartConfig;
use crate::error::{CartError, Result, ValidationError};
use crate::raw::{ProductImage, RawCart, RawLineItem};

// =============================================================================
// Edit Types
// =============================================================================

/// Direction of a single-step quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantityChange {
    /// Add one unit.
    Increment,
    /// Remove one unit.
    Decrement,
}

impl QuantityChange {
    const fn delta(self) -> i64 {
        match self {
            Self::Increment => 1,
            Self::Decrement => -1,
        }
    }
}

impl From<bool> for QuantityChange {
    /// `true` increments, `false` decrements.
    fn from(increment: bool) -> Self {
        if increment {
            Self::Increment
        } else {
            Self::Decrement
        }
    }
}

/// How decrements below zero are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuantityPolicy {
    /// Allow negative quantities; the caller is expected to prevent them.
    /// A warning is logged when one occurs.
    #[default]
    Permissive,
    /// Reject any decrement that would drop a quantity below zero.
    Strict,
}

// =============================================================================
// View Model
// =============================================================================

/// Derived view of one cart line.
///
/// `product_total_price == quantity * product_price` holds after every edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    line_item_id: LineItemId,
    variant_id: VariantId,
    quantity: i64,
    product_price: Price,
    product_image: Option<ProductImage>,
    product_title: String,
    product_total_price: Price,
}

impl CartLineView {
    fn from_raw(
        item: &RawLineItem,
        scale: PriceScale,
    ) -> std::result::Result<Self, ValidationError> {
        if item.quantity < 0 {
            return Err(ValidationError::NegativeQuantity {
                line_item_id: item.id.clone(),
                quantity: item.quantity,
            });
        }

        let raw_price = item
            .variant
            .price
            .as_deref()
            .ok_or_else(|| ValidationError::MissingPrice {
                line_item_id: item.id.clone(),
            })?;

        let product_price =
            Price::parse(raw_price, scale).map_err(|source| ValidationError::InvalidPrice {
                line_item_id: item.id.clone(),
                source,
            })?;

        let product_total_price = product_price
            .times(item.quantity)
            .ok_or_else(|| ValidationError::Overflow(item.id.clone()))?;

        Ok(Self {
            line_item_id: item.id.clone(),
            variant_id: item.variant.id.clone(),
            quantity: item.quantity,
            product_price,
            product_image: item.variant.image.clone(),
            product_title: item.title.clone(),
            product_total_price,
        })
    }

    /// Line item ID.
    #[must_use]
    pub const fn line_item_id(&self) -> &LineItemId {
        &self.line_item_id
    }

    /// Variant ID.
    #[must_use]
    pub const fn variant_id(&self) -> &VariantId {
        &self.variant_id
    }

    /// Current (possibly unsaved) quantity.
    #[must_use]
    pub const fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Unit price.
    #[must_use]
    pub const fn product_price(&self) -> Price {
        self.product_price
    }

    /// Variant image.
    #[must_use]
    pub const fn product_image(&self) -> Option<&ProductImage> {
        self.product_image.as_ref()
    }

    /// Product title.
    #[must_use]
    pub fn product_title(&self) -> &str {
        &self.product_title
    }

    /// `quantity * product_price`.
    #[must_use]
    pub const fn product_total_price(&self) -> Price {
        self.product_total_price
    }

    /// Whether the line has been zeroed (deleted but not yet committed).
    #[must_use]
    pub const fn is_zeroed(&self) -> bool {
        self.quantity == 0
    }
}

/// Normalized cart view model with local, uncommitted edits.
///
/// `total_price` starts at the backend-supplied total and is only ever
/// adjusted by each edit's delta. `total_quantity` always equals the sum of
/// line quantities. `dirty` is set by any edit and cleared only by
/// re-normalizing from a fresh [`RawCart`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartState {
    items: IndexMap<LineItemId, CartLineView>,
    total_price: Price,
    total_quantity: i64,
    dirty: bool,
    #[serde(skip)]
    quantity_policy: QuantityPolicy,
}

impl CartState {
    /// Derive a clean view model from a raw cart.
    ///
    /// The result owns copies of everything it needs; the raw cart may be
    /// dropped or changed afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Validation`] and rejects the whole cart if any
    /// line has a missing, malformed or negative price, a negative quantity,
    /// a duplicate ID, or totals that overflow, or if the cart total cannot
    /// be parsed.
    #[instrument(level = "debug", skip_all, fields(line_items = raw.line_items.len()))]
    pub fn normalize(raw: &RawCart, config: &CartConfig) -> Result<Self> {
        let mut items: IndexMap<LineItemId, CartLineView> =
            IndexMap::with_capacity(raw.line_items.len());
        let mut total_quantity: i64 = 0;

        for item in &raw.line_items {
            if items.contains_key(&item.id) {
                return Err(ValidationError::DuplicateLineItem(item.id.clone()).into());
            }
            let line = CartLineView::from_raw(item, config.price_scale)?;
            total_quantity = total_quantity
                .checked_add(line.quantity)
                .ok_or_else(|| ValidationError::Overflow(item.id.clone()))?;
            items.insert(item.id.clone(), line);
        }

        let total_price = Price::parse(&raw.total_price, config.price_scale)
            .map_err(ValidationError::InvalidTotalPrice)?;

        debug!(
            lines = items.len(),
            total_quantity,
            total_price = %total_price,
            "Cart normalized"
        );

        Ok(Self {
            items,
            total_price,
            total_quantity,
            dirty: false,
            quantity_policy: config.quantity_policy,
        })
    }

    /// Add or remove one unit of a line.
    ///
    /// Adjusts the line total, the cart total (by one unit price) and the
    /// total quantity (by one), and marks the cart dirty. Other lines are
    /// untouched.
    ///
    /// # Errors
    ///
    /// - [`CartError::NotFound`] if the line is not in the cart
    /// - [`CartError::InvariantViolation`] if the quantity would go below
    ///   zero under [`QuantityPolicy::Strict`]
    /// - [`CartError::Overflow`] if any total would overflow
    ///
    /// Nothing is modified when an error is returned.
    #[instrument(level = "debug", skip(self))]
    pub fn change_quantity(
        &mut self,
        line_item_id: &str,
        change: QuantityChange,
    ) -> Result<&CartLineView> {
        let line = self
            .items
            .get_mut(line_item_id)
            .ok_or_else(|| CartError::NotFound(LineItemId::new(line_item_id)))?;
        let overflow = || CartError::Overflow(line.line_item_id.clone());

        let delta = change.delta();
        let quantity = line.quantity.checked_add(delta).ok_or_else(overflow)?;
        if quantity < 0 && self.quantity_policy == QuantityPolicy::Strict {
            return Err(CartError::InvariantViolation(format!(
                "line item {line_item_id} quantity would drop to {quantity}"
            )));
        }

        let line_total = line.product_price.times(quantity).ok_or_else(overflow)?;
        let total_price = match change {
            QuantityChange::Increment => self.total_price.checked_add(line.product_price),
            QuantityChange::Decrement => self.total_price.checked_sub(line.product_price),
        }
        .ok_or_else(overflow)?;
        let total_quantity = self.total_quantity.checked_add(delta).ok_or_else(overflow)?;

        if quantity < 0 {
            warn!(line_item_id, quantity, "Line item quantity is negative");
        }

        line.quantity = quantity;
        line.product_total_price = line_total;
        self.total_price = total_price;
        self.total_quantity = total_quantity;
        self.dirty = true;

        debug!(
            quantity,
            total_quantity,
            total_price = %total_price,
            "Line quantity changed"
        );
        Ok(&*line)
    }

    /// Zero a line in place.
    ///
    /// The line stays in the cart (keeping order and keys stable) with
    /// quantity and total set to zero; its previous contribution is removed
    /// from the cart totals. Deleting an already-zeroed line changes nothing
    /// beyond the dirty flag.
    ///
    /// # Errors
    ///
    /// - [`CartError::NotFound`] if the line is not in the cart
    /// - [`CartError::Overflow`] if a total would overflow
    #[instrument(level = "debug", skip(self))]
    pub fn delete_line(&mut self, line_item_id: &str) -> Result<&CartLineView> {
        let line = self
            .items
            .get_mut(line_item_id)
            .ok_or_else(|| CartError::NotFound(LineItemId::new(line_item_id)))?;
        let overflow = || CartError::Overflow(line.line_item_id.clone());

        let removed = line
            .product_price
            .times(line.quantity)
            .ok_or_else(overflow)?;
        let total_price = self.total_price.checked_sub(removed).ok_or_else(overflow)?;
        let total_quantity = self
            .total_quantity
            .checked_sub(line.quantity)
            .ok_or_else(overflow)?;

        line.quantity = 0;
        line.product_total_price = Price::ZERO;
        self.total_price = total_price;
        self.total_quantity = total_quantity;
        self.dirty = true;

        debug!(total_quantity, total_price = %total_price, "Line deleted");
        Ok(&*line)
    }

    /// Build the save payload: every tracked line, in cart order, with its
    /// current quantity. Zeroed lines are included to signal removal.
    #[must_use]
    pub fn commit(&self) -> CommitPayload {
        self.items
            .values()
            .map(|line| LineQuantityUpdate {
                id: line.line_item_id.clone(),
                quantity: line.quantity,
            })
            .collect()
    }

    /// Verify the per-line and aggregate quantity invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvariantViolation`] describing the first broken
    /// invariant.
    pub fn check_invariants(&self) -> Result<()> {
        let mut quantity_sum: i64 = 0;
        for line in self.items.values() {
            if line.product_price.times(line.quantity) != Some(line.product_total_price) {
                return Err(CartError::InvariantViolation(format!(
                    "line item {} total {} != {} x {}",
                    line.line_item_id, line.product_total_price, line.quantity, line.product_price
                )));
            }
            quantity_sum = quantity_sum
                .checked_add(line.quantity)
                .ok_or_else(|| CartError::Overflow(line.line_item_id.clone()))?;
        }
        if quantity_sum != self.total_quantity {
            return Err(CartError::InvariantViolation(format!(
                "total quantity {} != line quantity sum {quantity_sum}",
                self.total_quantity
            )));
        }
        Ok(())
    }

    /// All lines keyed by line item ID, in cart order.
    #[must_use]
    pub const fn items(&self) -> &IndexMap<LineItemId, CartLineView> {
        &self.items
    }

    /// Iterate lines in cart order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLineView> {
        self.items.values()
    }

    /// Look up a single line.
    #[must_use]
    pub fn line(&self, line_item_id: &str) -> Option<&CartLineView> {
        self.items.get(line_item_id)
    }

    /// Running cart total.
    #[must_use]
    pub const fn total_price(&self) -> Price {
        self.total_price
    }

    /// Sum of all line quantities.
    #[must_use]
    pub const fn total_quantity(&self) -> i64 {
        self.total_quantity
    }

    /// Whether local edits exist that have not been re-normalized away.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of tracked lines, zeroed ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart tracks no lines at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Policy applied to decrements below zero.
    #[must_use]
    pub const fn quantity_policy(&self) -> QuantityPolicy {
        self.quantity_policy
    }
}

impl TryFrom<&RawCart> for CartState {
    type Error = CartError;

    fn try_from(raw: &RawCart) -> Result<Self> {
        Self::normalize(raw, &CartConfig::default())
    }
}

// =============================================================================
// Commit Payload
// =============================================================================

/// Quantity update for one line, as sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineQuantityUpdate {
    /// Line item ID.
    pub id: LineItemId,
    /// New quantity; zero removes the line.
    pub quantity: i64,
}

/// Ordered list of line updates produced by [`CartState::commit`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitPayload(Vec<LineQuantityUpdate>);

impl CommitPayload {
    /// Updates in cart order.
    #[must_use]
    pub fn lines(&self) -> &[LineQuantityUpdate] {
        &self.0
    }

    /// Number of updates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no updates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate updates in cart order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineQuantityUpdate> {
        self.0.iter()
    }

    /// Consume the payload and return the updates.
    #[must_use]
    pub fn into_inner(self) -> Vec<LineQuantityUpdate> {
        self.0
    }
}

impl FromIterator<LineQuantityUpdate> for CommitPayload {
    fn from_iter<I: IntoIterator<Item = LineQuantityUpdate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CommitPayload {
    type Item = &'a LineQuantityUpdate;
    type IntoIter = std::slice::Iter<'a, LineQuantityUpdate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for CommitPayload {
    type Item = LineQuantityUpdate;
    type IntoIter = std::vec::IntoIter<LineQuantityUpdate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
