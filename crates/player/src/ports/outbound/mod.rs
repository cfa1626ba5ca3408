//! Outbound ports - Interfaces for external collaborators
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing the session core to drive the transport and the UI without
//! depending on concrete implementations.
//!
//! # Traits
//!
//! - [`OutboundPort`] - Sending frames and closing the connection
//! - [`BoardRenderPort`] - Rendering authoritative placements
//! - [`LinkSharingPort`] - Exposing join/watch links
//! - [`NotificationPort`] - Showing messages to the user

pub mod board_port;
pub mod link_sharing_port;
pub mod notification_port;
pub mod outbound_port;

pub use board_port::BoardRenderPort;
pub use link_sharing_port::LinkSharingPort;
pub use notification_port::NotificationPort;
pub use outbound_port::{OutboundPort, NORMAL_CLOSURE, PROTOCOL_ERROR_CLOSURE};

// Re-export mock types when testing feature is enabled
#[cfg(any(test, feature = "testing"))]
pub use board_port::MockBoardRenderPort;
#[cfg(any(test, feature = "testing"))]
pub use link_sharing_port::MockLinkSharingPort;
#[cfg(any(test, feature = "testing"))]
pub use notification_port::MockNotificationPort;
#[cfg(any(test, feature = "testing"))]
pub use outbound_port::MockOutboundPort;
