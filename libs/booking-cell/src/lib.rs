pub mod models;
pub mod services;
pub mod state;

pub use models::*;
pub use services::BookingFlowService;
pub use state::{
    BookingFlowState, BOOKING_INCOMPLETE_MESSAGE, NO_AVAILABILITY_NOTICE, NO_PROVIDERS_NOTICE,
};
