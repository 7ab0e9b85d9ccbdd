pub mod token_service;
pub mod user_service;

pub use token_service::TokenService;
pub use user_service::PasswordVerifier;
