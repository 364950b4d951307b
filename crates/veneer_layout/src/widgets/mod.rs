//! Overlay widgets

pub mod scroll_area;

pub use scroll_area::ScrollArea;
