//! 도메인 엔티티
//!
//! MongoDB 컬렉션에 저장되는 영속 객체들을 정의합니다.

pub mod users;
