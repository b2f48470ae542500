pub mod auth;
pub mod body;
pub mod path;
pub mod response;

pub use auth::{require_auth, AuthUser};
pub use body::JsonBody;
pub use path::PathParams;
pub use response::{ApiResponse, ApiResult};
