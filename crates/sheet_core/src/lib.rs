//! Sheet Core
//!
//! Foundational primitives shared by the bottom sheet crates:
//!
//! - **Color**: RGBA colors with hex parsing (`#RGB`, `#RRGGBB`, `#RRGGBBAA`)
//! - **Geometry**: `Vec2`, `Point`, `Size`, and `Rect` with hit testing
//! - **State Machines**: the `StateTransitions` trait used by widget FSMs
//!
//! # Example
//!
//! ```rust
//! use sheet_core::{Color, Rect, Point};
//!
//! let tint = Color::parse_hex("#25252599").unwrap();
//! assert!((tint.a - 0.6).abs() < 0.01);
//!
//! let panel = Rect::new(0.0, 500.0, 400.0, 300.0);
//! assert!(panel.contains(Point::new(10.0, 600.0)));
//! ```

pub mod color;
pub mod error;
pub mod fsm;
pub mod geometry;

pub use color::Color;
pub use error::{CoreError, Result};
pub use fsm::StateTransitions;
pub use geometry::{Point, Rect, Size, Vec2};
