//! Bottom Sheet
//!
//! A draggable panel that slides up from the bottom edge of the screen.
//!
//! # Features
//!
//! - **Show / close**: height animates 0 → H on show and H → 0 on close;
//!   the close callback fires only once the panel is fully hidden
//! - **Drag to dismiss**: downward drags move the panel; releasing past a
//!   third of its height closes it, anything less springs back
//! - **Presentation**: modal (dimmed full-screen backdrop, native back
//!   handling) or overlay (bottom strip, back presses intercepted through
//!   the [`BackHandlerRegistry`])
//! - **Tap outside**: tapping the backdrop closes the sheet
//! - **Config files**: [`SheetConfig`] loads from TOML
//!
//! # Example
//!
//! ```rust
//! use bottom_sheet::prelude::*;
//!
//! let sheet = bottom_sheet(320.0)
//!     .use_modal(false)
//!     .has_draggable_icon(true)
//!     .content("Share to...")
//!     .viewport(Size::new(390.0, 844.0))
//!     .build();
//!
//! sheet.show();
//! while sheet.tick(16.0) {}
//!
//! let frame = sheet.frame().unwrap();
//! assert_eq!(frame.layout.panel.rect.height(), 320.0);
//! assert_eq!(*frame.content, "Share to...");
//! ```

pub mod config;
pub mod error;
pub mod gesture;
pub mod layout;
pub mod sheet;
pub mod state;

pub use config::{Presentation, SheetConfig};
pub use error::{Result, SheetError};
pub use gesture::{DragTracker, GestureState, ReleaseAction};
pub use layout::{DragIconFrame, Hit, PanelFrame, SheetLayout};
pub use sheet::{bottom_sheet, BottomSheet, BottomSheetBuilder, OnCloseCallback, SheetFrame};
pub use state::{sheet_events, SheetState};

pub use sheet_platform::{BackDispatch, BackHandlerRegistry, HostEvent, TouchEvent};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Presentation, SheetConfig};
    pub use crate::layout::{Hit, SheetLayout};
    pub use crate::sheet::{bottom_sheet, BottomSheet, BottomSheetBuilder, SheetFrame};
    pub use crate::state::SheetState;

    pub use sheet_core::{Color, Point, Rect, Size, Vec2};
    pub use sheet_platform::{BackDispatch, BackHandlerRegistry, HostEvent, TouchEvent};
}
