//! Sheet Platform Glue
//!
//! Platform-facing types the bottom sheet consumes:
//!
//! - [`TouchEvent`] - touch input in window coordinates
//! - [`HostEvent`] - the events a host event loop feeds to widgets
//! - [`BackHandlerRegistry`] - the process-wide hardware back-button bus with
//!   scoped [`BackSubscription`]s
//!
//! # Example
//!
//! ```rust
//! use sheet_platform::{BackDispatch, BackHandlerRegistry};
//!
//! let registry = BackHandlerRegistry::new();
//! let mut subscription = registry.add_listener(|| true);
//! assert_eq!(registry.dispatch(), BackDispatch::Handled);
//!
//! subscription.remove();
//! assert_eq!(registry.dispatch(), BackDispatch::Unhandled);
//! ```

mod back;
mod event;
mod input;

pub use back::{BackCallback, BackDispatch, BackHandlerId, BackHandlerRegistry, BackSubscription};
pub use event::HostEvent;
pub use input::TouchEvent;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::back::{BackDispatch, BackHandlerRegistry, BackSubscription};
    pub use crate::event::HostEvent;
    pub use crate::input::TouchEvent;
}
