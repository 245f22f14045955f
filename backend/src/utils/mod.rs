pub mod jwt;
pub mod password;
pub mod validation;

pub use jwt::{Claims, JwtService};
pub use password::*;
pub use validation::*;
