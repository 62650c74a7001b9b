//! Authentication module
//!
//! Bearer JWT verification for the API routes.

mod jwt;
mod middleware;

pub use jwt::{Claims, JwtService};
pub use middleware::AuthUser;
