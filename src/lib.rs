//! # Provmap
//!
//! A Rust-native engine for "which provinces have I visited" maps.
//!
//! The engine keeps a client-side visitation set synchronized with a
//! remote persistence gateway, overlays pin markers and a tooltip onto a
//! vector map whose shapes scroll and resize independently of the
//! overlay, and turns raw pointer/touch events into toggle, hover and
//! detail intents with optimistic-first state updates.

pub mod core;
pub mod input;
pub mod overlay;
pub mod page;
pub mod persist;
pub mod prelude;
pub mod state;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    geometry::{ContainerLayout, LayoutRect, Point},
    palette::{Color, ColorPicker, RandomPicker},
    province::{display_name, ProvinceId},
    registry::{compute_anchor, FixedLayout, LayoutProbe},
};

pub use crate::overlay::{
    pin::{Pin, PinPhase},
    pins::PinOverlay,
    tooltip::{TooltipController, TooltipState},
};

pub use crate::input::{
    dispatcher::{DispatcherOptions, InteractionDispatcher},
    events::{Intent, PointerEvent},
};

pub use crate::state::visited::{PendingToggle, VisitStats, VisitedStore};

pub use crate::persist::{
    gateway::{ProvincePhoto, ToggleAction, ToggleResult, VisitGateway, VisitRecord},
    memory::InMemoryGateway,
};

pub use crate::page::MapPageController;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown province: {0}")]
    UnknownProvince(String),

    #[error("Overlay error: {0}")]
    Overlay(String),
}

/// Error type alias for convenience
pub type Error = MapError;
