//! Prelude module for common provmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use provmap::prelude::*;`

pub use crate::core::{
    constants,
    geometry::{ContainerLayout, LayoutRect, Point},
    palette::{Color, ColorPicker, RandomPicker, SequencePicker, PALETTE},
    province::{display_name, normalize_id, ProvinceId},
    registry::{compute_anchor, FixedLayout, LayoutProbe},
};

pub use crate::overlay::{
    pin::{Pin, PinPhase},
    pins::{PinAnimationOptions, PinOverlay},
    tooltip::{TooltipController, TooltipOptions, TooltipState},
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

pub use crate::{Error as MapError, Result};

pub use std::{
    sync::Arc,
    time::Duration,
};

pub use instant::Instant;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
