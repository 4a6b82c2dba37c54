//! Authentication route handlers
//!
//! This module contains the token lifecycle endpoints:
//! - Token issuance for known identities and provider login
//! - Reissue with the access token alone or together with the refresh token
//! - Logout

pub mod generate;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod reissue;

pub use generate::generate;
pub use login::login;
pub use logout::logout;
pub use refresh::refresh;
pub use reissue::reissue;
