//! Custom PC builder.
//!
//! Eight fixed component slots, a per-slot part picker, and the bulk hand-off
//! to the cart.

mod slot;
mod state;

pub use slot::BuildSlot;
pub use state::{
    BulkAddReport, CandidateRequest, CartSink, PcBuild, PickerSession, SlotFailure, SlotState,
};
