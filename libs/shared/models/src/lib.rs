pub mod catalog;
pub mod error;
pub mod stage;

pub use catalog::{AvailabilitySlot, Service, StaffMember};
pub use error::ApiError;
pub use stage::StageState;
