//! External-collaborator seams.
//!
//! The host chat application owns the message data, the rendered node tree,
//! and the change signal. This module defines the traits and plumbing the
//! engine needs from it, and nothing more: everything behind these seams is
//! foreign, possibly stale, and mutable out from under us at any time.

pub mod mutation;
pub mod store;
pub mod surface;

pub use mutation::{mutation_channel, MutationFeed, MutationNotifier, Subscription};
pub use store::MessageStore;
pub use surface::{MessageSurface, SurfaceNode};
