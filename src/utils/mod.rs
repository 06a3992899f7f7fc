//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 헤더 값 정리, 로그 마스킹
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::bearer_token;
//!
//! let token = bearer_token("Bearer 9f86d081884c7d65");
//! ```

pub mod string_utils;
