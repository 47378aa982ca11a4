pub mod constants;
pub mod geometry;
pub mod palette;
pub mod province;
pub mod registry;

// Re-export the essential types
pub use geometry::{ContainerLayout, LayoutRect, Point};
pub use palette::{Color, ColorPicker, RandomPicker, SequencePicker};
pub use province::{display_name, ProvinceId};
pub use registry::{compute_anchor, FixedLayout, LayoutProbe};
