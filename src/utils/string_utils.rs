//! # 문자열 유틸리티
//!
//! 헤더 값 정리와 로그용 마스킹 함수들입니다.

const BEARER_PREFIX: &str = "Bearer ";

/// Authorization 헤더 값에서 토큰을 꺼냅니다.
///
/// 앞뒤 공백을 제거하고, `Bearer ` 접두사가 있으면 떼어냅니다.
/// 접두사가 없으면 값 전체를 토큰으로 봅니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(bearer_token("Bearer abc123"), "abc123");
/// assert_eq!(bearer_token("abc123"), "abc123");
/// assert_eq!(bearer_token("   "), "");
/// ```
pub fn bearer_token(header_value: &str) -> &str {
    let trimmed = header_value.trim();
    trimmed
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .unwrap_or(trimmed)
}

/// 로그에 남길 이메일 주소를 가립니다. (`alice@example.com` → `a***@example.com`)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer abc123"), "abc123");
        assert_eq!(bearer_token("abc123"), "abc123");
        assert_eq!(bearer_token("  abc123  "), "abc123");
        assert_eq!(bearer_token(""), "");
        assert_eq!(bearer_token("   "), "");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("@example.com"), "***@example.com");
        assert_eq!(mask_email("no-at-sign"), "***");
    }
}
