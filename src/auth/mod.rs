pub mod middleware;
pub mod utils;

pub use middleware::{AdminGuard, ADMIN_PASSWORD_HEADER};
pub use utils::{require_admin, secrets_match};
