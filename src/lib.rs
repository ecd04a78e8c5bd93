pub mod error;
pub mod media;
pub mod models;
pub mod state;
pub mod utils;

pub use error::AppError;
pub use state::manager::StateManager;
pub use state::session::PersonaRole;
pub use state::store::{FileStore, MemoryStore, Store};
pub use state::types::AppState;
