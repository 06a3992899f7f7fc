//! 사용자 계정 응답 DTO

pub mod account_response;

pub use account_response::{MessageResponse, PendingRequirementsResponse, TokenResponse};
