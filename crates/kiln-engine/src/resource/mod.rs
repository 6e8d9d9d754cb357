//! Generational slot storage for engine-owned resources.
//!
//! Every create call hands out a move-only [`Handle`]; the paired delete call
//! consumes it. A handle whose slot was released and reused is stale and is
//! rejected instead of aliasing the new occupant.

mod slots;

pub use slots::{Handle, Resource, SlotKey, Slots, StaleHandle};
