pub mod pin;
pub mod pins;
pub mod tooltip;

// Re-export the essential types
pub use pin::{ease_out_cubic, Pin, PinPhase};
pub use pins::{PinAnimationOptions, PinOverlay};
pub use tooltip::{TooltipController, TooltipOptions, TooltipState};
