pub mod app;
pub mod config;
pub mod display;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routines;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod validation;

pub use app::router;
pub use config::Config;
pub use errors::{StoreError, ValidationError};
pub use state::AppState;
pub use storage::{FileSlots, MemorySlots, Slot, SlotStorage};
pub use store::HealthStore;
