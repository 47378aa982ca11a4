pub mod dispatcher;
pub mod events;

// Re-export the essential types
pub use dispatcher::{DispatcherOptions, InteractionDispatcher};
pub use events::{Intent, PointerEvent};
