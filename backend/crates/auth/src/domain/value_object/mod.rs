//! Value Object Module

pub mod display_name;
pub mod handle;
pub mod national_id;
pub mod session_token;
pub mod user_password;

pub use display_name::DisplayName;
pub use handle::Handle;
pub use national_id::{NationalId, PhoneNumber};
pub use session_token::{SessionKey, SessionToken};
pub use user_password::{RawPassword, UserPassword};
