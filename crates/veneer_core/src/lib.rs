//! Veneer Core
//!
//! This crate provides the foundational primitives for the Veneer scroll overlay:
//!
//! - **Geometry**: Points, sizes, rectangles and per-axis pairs
//! - **State Transitions**: Typed event-driven state enums
//! - **Event Dispatch**: Document-scoped listeners with guaranteed cleanup
//!
//! # Example
//!
//! ```rust
//! use veneer_core::events::{event_types, Event, EventDispatcher};
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::sync::Arc;
//!
//! let document = EventDispatcher::new();
//! let moves = Arc::new(AtomicU32::new(0));
//! let counter = moves.clone();
//!
//! let subscription = document.subscribe(event_types::POINTER_MOVE, move |_| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! document.dispatch(&mut Event::pointer(event_types::POINTER_MOVE, 10.0, 20.0));
//! drop(subscription);
//! document.dispatch(&mut Event::pointer(event_types::POINTER_MOVE, 10.0, 20.0));
//!
//! assert_eq!(moves.load(Ordering::SeqCst), 1);
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;

pub use events::{Event, EventData, EventDispatcher, EventType, ListenerId, Subscription};
pub use fsm::StateTransitions;
pub use geometry::{Axis, AxisPair, Point, Rect, Size};
