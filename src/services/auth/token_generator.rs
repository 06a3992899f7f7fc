//! 토큰 생성기
//!
//! 인증 토큰용 불투명 식별자와 OTP 용 6자리 숫자 코드를 생성합니다.
//! 두 경우 모두 OS 난수 생성기(CSPRNG)를 사용합니다.

use rand::Rng;
use rand::rngs::OsRng;
use uuid::Uuid;

use crate::domain::models::token::TokenKind;

/// OTP 자릿수
pub const NUMERIC_CODE_LENGTH: usize = 6;

/// 122비트 엔트로피의 32자리 16진수 문자열 (구분자 없음)
pub fn generate_opaque_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// 0 으로 채워진 균등 분포 6자리 숫자 문자열 (예: "004821")
pub fn generate_numeric_code() -> String {
    let code: u32 = OsRng.gen_range(0..1_000_000);
    format!("{:0width$}", code, width = NUMERIC_CODE_LENGTH)
}

pub fn generate(kind: TokenKind) -> String {
    match kind {
        TokenKind::OpaqueId => generate_opaque_id(),
        TokenKind::NumericCode => generate_numeric_code(),
    }
}
