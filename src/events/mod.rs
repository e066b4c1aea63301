//! Public event stream.
//!
//! The game appends every event to its log and then delivers it, in order,
//! to each player's card tracker, each player's strategy, and finally to the
//! listeners registered on the `EventBus`.
//!
//! ## Key Types
//!
//! - `GameEvent`: Turn count, up player and `EventKind` payload
//! - `EventType`: Payload-free event discriminant, for filtering
//! - `EventBus`: Ordered listener registry

pub mod event;
pub mod bus;

pub use event::{EventKind, EventType, GameEvent};
pub use bus::{EventBus, ListenerId};
