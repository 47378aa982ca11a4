pub mod gateway;
pub mod memory;

// Re-export the essential types
pub use gateway::{
    NewPhoto, ProvincePhoto, ToggleAction, ToggleResult, VisitGateway, VisitRecord,
};
pub use memory::InMemoryGateway;
