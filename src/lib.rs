pub mod config;
pub mod deal;
pub mod error;
pub mod projector;
pub mod query;
pub mod search;
pub mod search_clients;
pub mod service;

pub use crate::deal::{Deal, UpdateEnvelope};
pub use crate::error::AppError;
pub use crate::search::DealIndex;
pub use crate::service::DealService;
