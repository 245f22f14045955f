pub mod client_store;
pub mod constants;
pub mod dto;
pub mod types;

pub use constants::*;
pub use dto::*;
pub use types::*;
