//! 데이터 액세스 계층
//!
//! 사용자 문서는 [`users::UserStore`] trait 뒤에 있습니다. 운영에서는 MongoDB 구현을,
//! 테스트에서는 메모리 구현을 [`AppContext`](crate::core::AppContext) 에 주입합니다.
//!
//! ```rust,ignore
//! let users = UserRepository::new(&database);
//! users.create_indexes().await?;
//! let user = users.find_by_email("user@example.com").await?;
//! ```

pub mod users;
