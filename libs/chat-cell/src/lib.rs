pub mod models;
pub mod services;
pub mod state;

pub use models::*;
pub use services::ChatSession;
pub use state::ChatState;
