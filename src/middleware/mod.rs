pub mod auth;
pub mod cors;
pub mod logging;
pub mod security;

pub use auth::*;
pub use cors::*;
pub use logging::*;
pub use security::*;
