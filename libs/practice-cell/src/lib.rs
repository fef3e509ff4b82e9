pub mod models;
pub mod services;
pub mod state;

pub use models::*;
pub use services::PracticeAdminService;
pub use state::{
    PracticeState, AVAILABILITY_SAVED_MESSAGE, NO_STAFF_SELECTED_MESSAGE, PROFILE_SAVED_MESSAGE,
    SERVICE_ADDED_MESSAGE, STAFF_UPDATED_MESSAGE,
};
