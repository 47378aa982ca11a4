pub mod visited;

// Re-export the essential types
pub use visited::{PendingToggle, Reconciliation, VisitStats, VisitedStore};
