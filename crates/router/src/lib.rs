#![warn(missing_docs)]
//! Decision logic mapping AR anchor and touch events to scene mutations.
//!
//! The router never talks to a renderer, session or haptics engine directly.
//! Every decision comes back as a value ([`SceneMutation`], [`ImagePlacement`],
//! [`LogRecord`]) that a host-owned step applies. Events must be fed serially
//! from the host frame loop; the router takes `&mut self` and is not meant to
//! be shared across threads.
//!
//! [`SceneMutation`]: arplace_core::SceneMutation
//! [`ImagePlacement`]: arplace_core::ImagePlacement
//! [`LogRecord`]: arplace_core::LogRecord

mod lifecycle;
mod router;

pub use lifecycle::ImageAnchorPhase;
pub use router::{
    AnchorAdded, AnchorEventRouter, RouterError, PLACED_CUBE_SIDE, PLANE_MARKER_SIDE,
};
