use crate::core::{geometry::Point, palette::Color, province::ProvinceId};
use crate::persist::gateway::ToggleAction;
use serde::{Deserialize, Serialize};

/// Raw pointer/touch events arriving from the map's province shapes and
/// the hover-preview surface. Positions are container-relative pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Single click/tap on a province shape
    Click {
        province: ProvinceId,
        position: Point,
    },
    /// Pointer entered a province shape
    Enter {
        province: ProvinceId,
        position: Point,
    },
    /// Pointer moving while over a province shape
    Move {
        province: ProvinceId,
        position: Point,
    },
    /// Pointer left a province shape
    Leave { province: ProvinceId },
    /// Touch began on a province shape (touch has no leave event)
    TouchStart {
        province: ProvinceId,
        position: Point,
    },
    /// Pointer moved onto the hover-preview surface itself
    PreviewEnter,
    /// Pointer left the hover-preview surface
    PreviewLeave,
    /// The overlay container scrolled
    Scroll { dx: f64, dy: f64 },
    /// The overlay container resized
    Resize,
}

impl PointerEvent {
    /// Gets the position associated with this event, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Click { position, .. } => Some(*position),
            PointerEvent::Enter { position, .. } => Some(*position),
            PointerEvent::Move { position, .. } => Some(*position),
            PointerEvent::TouchStart { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Gets the province this event targets, if any
    pub fn province(&self) -> Option<&ProvinceId> {
        match self {
            PointerEvent::Click { province, .. }
            | PointerEvent::Enter { province, .. }
            | PointerEvent::Move { province, .. }
            | PointerEvent::Leave { province }
            | PointerEvent::TouchStart { province, .. } => Some(province),
            _ => None,
        }
    }

    /// Checks if this event invalidates overlay geometry
    pub fn is_geometry_event(&self) -> bool {
        matches!(self, PointerEvent::Scroll { .. } | PointerEvent::Resize)
    }
}

/// Intents the dispatcher derives from raw events. The page controller
/// executes them; the dispatcher only decides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    /// Flip a province's visited state, optimistically first
    Toggle {
        province: ProvinceId,
        action: ToggleAction,
        /// Palette color for the new pin; `None` on remove
        color: Option<Color>,
    },
    /// Show the tooltip at the pointer position
    ShowTooltip {
        text: String,
        position: Point,
        /// Arm the touch dwell auto-hide timer
        dwell: bool,
    },
    /// Follow the pointer with the tooltip
    MoveTooltip { position: Point },
    HideTooltip,
    /// Apply hover emphasis to a shape
    Emphasize { province: ProvinceId },
    /// Remove hover emphasis from a shape
    ClearEmphasis { province: ProvinceId },
    /// Raise the richer hover-preview surface for a visited province
    ShowPreview { province: ProvinceId },
    HidePreview,
    /// Open the detail surface for a visited province
    OpenDetail { province: ProvinceId },
    /// Overlay geometry changed; reposition pins next frame
    Reposition,
}
