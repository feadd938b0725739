//! PC-builder selection state machine.

use serde::{Deserialize, Serialize};

use crate::builder::BuildSlot;
use crate::catalog::{Category, PartKind, Product, ProductSnapshot};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use crate::search::{distinct_brands, PickerFilter};

/// Receiver of cart additions.
pub trait CartSink {
    /// Add `quantity` units of a product.
    fn add_to_cart(&mut self, product: &ProductSnapshot, quantity: i64) -> Result<(), CommerceError>;
}

/// State of a single slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SlotState {
    #[default]
    Empty,
    Filled(ProductSnapshot),
}

impl SlotState {
    pub fn product(&self) -> Option<&ProductSnapshot> {
        match self {
            SlotState::Empty => None,
            SlotState::Filled(snapshot) => Some(snapshot),
        }
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, SlotState::Filled(_))
    }
}

/// Candidate fetch issued when a picker opens.
///
/// Maps to `GET /products?category=parts&subCategory=<part kind>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateRequest {
    pub slot: BuildSlot,
    pub category: Category,
    pub part_kind: PartKind,
    /// Identifies this fetch; responses carrying an older ticket are dropped.
    pub ticket: u64,
}

/// The open part picker for one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerSession {
    pub slot: BuildSlot,
    pub ticket: u64,
    pub filter: PickerFilter,
    pub candidates: Vec<Product>,
    /// Whether the candidate fetch has answered.
    pub loaded: bool,
}

/// Outcome of a bulk hand-off to the cart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BulkAddReport {
    /// Slots whose product was added; these are now empty.
    pub added: Vec<BuildSlot>,
    /// Slots whose addition failed; these keep their selection.
    pub failed: Vec<SlotFailure>,
}

impl BulkAddReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotFailure {
    pub slot: BuildSlot,
    pub product_id: ProductId,
    pub error: CommerceError,
}

/// Session-scoped custom PC build.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PcBuild {
    slots: [SlotState; 8],
    picker: Option<PickerSession>,
    last_ticket: u64,
}

impl PcBuild {
    /// A build with every slot empty.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, slot: BuildSlot) -> &SlotState {
        &self.slots[slot.index()]
    }

    /// Every slot with its state, in builder order.
    pub fn slots(&self) -> impl Iterator<Item = (BuildSlot, &SlotState)> {
        BuildSlot::ALL.into_iter().map(move |slot| (slot, self.slot(slot)))
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_filled()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    /// Sum of prices over filled slots.
    pub fn total_price(&self) -> Money {
        self.slots
            .iter()
            .filter_map(SlotState::product)
            .fold(Money::zero(Currency::VND), |acc, p| {
                Money::new(acc.amount.saturating_add(p.price.amount), acc.currency)
            })
    }

    /// Open the picker for a slot.
    ///
    /// Any previous picker is replaced and its sub-filters are not carried
    /// over. The caller performs the returned fetch and hands the response to
    /// [`PcBuild::receive_candidates`].
    pub fn open_picker(&mut self, slot: BuildSlot) -> CandidateRequest {
        self.last_ticket += 1;
        let ticket = self.last_ticket;
        self.picker = Some(PickerSession {
            slot,
            ticket,
            filter: PickerFilter::default(),
            candidates: Vec::new(),
            loaded: false,
        });

        tracing::debug!(slot = %slot, ticket, "opened part picker");

        CandidateRequest {
            slot,
            category: Category::Parts,
            part_kind: slot.part_kind(),
            ticket,
        }
    }

    /// Apply a candidate response.
    ///
    /// Returns false, leaving state untouched, when the ticket no longer
    /// belongs to the open picker.
    pub fn receive_candidates(&mut self, ticket: u64, products: Vec<Product>) -> bool {
        match self.picker.as_mut() {
            Some(picker) if picker.ticket == ticket => {
                picker.candidates = products;
                picker.loaded = true;
                true
            }
            _ => {
                tracing::warn!(ticket, "discarding stale candidate response");
                false
            }
        }
    }

    pub fn picker(&self) -> Option<&PickerSession> {
        self.picker.as_ref()
    }

    /// Mutable access to the open picker's brand/price sub-filter.
    pub fn picker_filter_mut(&mut self) -> Option<&mut PickerFilter> {
        self.picker.as_mut().map(|p| &mut p.filter)
    }

    /// Candidates visible under the picker's sub-filter.
    pub fn picker_candidates(&self) -> Vec<Product> {
        self.picker
            .as_ref()
            .map(|p| p.filter.apply(&p.candidates))
            .unwrap_or_default()
    }

    /// Brand options for the picker's sidebar.
    pub fn picker_brands(&self) -> Vec<String> {
        self.picker
            .as_ref()
            .map(|p| distinct_brands(&p.candidates))
            .unwrap_or_default()
    }

    pub fn close_picker(&mut self) {
        self.picker = None;
    }

    /// Put a product into a slot.
    ///
    /// Rejected without any state change when the product is out of stock or
    /// has no price. A picker open on the same slot closes.
    pub fn select_product(&mut self, slot: BuildSlot, product: &Product) -> Result<(), CommerceError> {
        if !product.is_in_stock() {
            return Err(CommerceError::OutOfStock(product.id.to_string()));
        }
        let snapshot = product.snapshot()?;

        tracing::debug!(slot = %slot, product = %snapshot.id, "selected build component");
        self.slots[slot.index()] = SlotState::Filled(snapshot);

        if self.picker.as_ref().is_some_and(|p| p.slot == slot) {
            self.picker = None;
        }
        Ok(())
    }

    /// Hand every selected component to the cart, one unit each.
    ///
    /// Additions are attempted in slot order and are not transactional: a
    /// failure does not undo earlier additions. Slots that were added are
    /// emptied; slots that failed keep their selection and are listed in the
    /// report.
    pub fn add_all_to_cart<S: CartSink + ?Sized>(&mut self, cart: &mut S) -> Result<BulkAddReport, CommerceError> {
        if self.is_empty() {
            return Err(CommerceError::EmptyBuild);
        }

        let mut report = BulkAddReport::default();
        for slot in BuildSlot::ALL {
            let SlotState::Filled(snapshot) = &self.slots[slot.index()] else {
                continue;
            };
            match cart.add_to_cart(snapshot, 1) {
                Ok(()) => report.added.push(slot),
                Err(error) => report.failed.push(SlotFailure {
                    slot,
                    product_id: snapshot.id.clone(),
                    error,
                }),
            }
        }

        for slot in &report.added {
            self.slots[slot.index()] = SlotState::Empty;
        }

        if !report.is_complete() {
            tracing::warn!(
                added = report.added.len(),
                failed = report.failed.len(),
                "build only partially added to cart"
            );
        }

        Ok(report)
    }
}
