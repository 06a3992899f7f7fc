//! # Core Module
//!
//! 서비스 전역에서 사용하는 기반 타입을 제공합니다.
//!
//! - [`errors`] - `AppError` 와 HTTP 응답 매핑
//! - [`context`] - 시작 시 구성되는 의존성 묶음 (`AppContext`)
//!
//! 의존성은 전역 레지스트리에서 찾지 않고, `main` 에서 한 번 만든 [`AppContext`] 를
//! `web::Data` 로 공유합니다.

pub mod context;
pub mod errors;

pub use context::{AppContext, ContextOptions};
pub use errors::*;
