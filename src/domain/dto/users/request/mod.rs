//! 사용자 계정 요청 DTO

pub mod account_request;
pub mod signup_form;

pub use account_request::*;
pub use signup_form::{signup_form_fields, FormFieldSpec, SIGNUP_FORM_FIELDS};
