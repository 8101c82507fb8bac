//! Value Objects
//!
//! Immutable, self-validating domain primitives.

pub mod email;
pub mod session_token;
pub mod user_name;
pub mod user_password;
pub mod user_role;

pub use email::Email;
pub use kernel::id::UserId;
pub use session_token::SessionToken;
pub use user_name::{UserName, UserNameError};
pub use user_password::{RawPassword, UserPassword};
pub use user_role::UserRole;
