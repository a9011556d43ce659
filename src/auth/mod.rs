pub mod context;
pub mod token;

pub use context::AuthContext;
pub use token::{issue_token, verify_token, Claims};
