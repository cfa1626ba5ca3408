//! Session core: role negotiation, event routing and input capture.
//!
//! Control flow for one connection:
//! 1. [`negotiate`] sends exactly one `Init` declaring the role
//! 2. [`EventRouter`] decodes and dispatches every inbound frame
//! 3. [`InputCapture`] turns column clicks into `Play` messages
//! 4. A `Win` event (or a fatal error) terminates the session
//!
//! [`SessionDriver`] wires the three together over a live WebSocket.

mod driver;
mod input;
mod negotiator;
mod role;
mod router;

pub use driver::{Collaborators, SessionDriver, SessionOutcome};
pub use input::{ClickTarget, InputCapture};
pub use negotiator::negotiate;
pub use role::SessionRole;
pub use router::{Dispatch, EventRouter};
