//! Business services containing the token lifecycle use cases.

pub mod token;

pub use token::{
    extract_bearer, mask_subject, Rs256KeyManager, TokenCodec, TokenService, TokenServiceConfig,
};
