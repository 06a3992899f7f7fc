//! 회원가입 폼 메타데이터
//!
//! 프론트엔드가 회원가입 폼을 그릴 때 사용하는 필드 정의 테이블입니다.

use serde_json::{Map, Value};

/// 폼 필드 하나의 표시 정보
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormFieldSpec {
    pub form_field: &'static str,
    pub form_field_type: &'static str,
    pub display_name: &'static str,
}

/// [`SignupRequest`](super::SignupRequest) 의 입력 필드들
pub const SIGNUP_FORM_FIELDS: &[FormFieldSpec] = &[
    FormFieldSpec {
        form_field: "given_name",
        form_field_type: "text",
        display_name: "First Name",
    },
    FormFieldSpec {
        form_field: "family_name",
        form_field_type: "text",
        display_name: "Last Name",
    },
    FormFieldSpec {
        form_field: "email",
        form_field_type: "email",
        display_name: "Email",
    },
    FormFieldSpec {
        form_field: "password",
        form_field_type: "password",
        display_name: "Password",
    },
];

/// `{ form_field: { form_field_type, display_name } }` 형태의 JSON 객체
pub fn signup_form_fields() -> Map<String, Value> {
    SIGNUP_FORM_FIELDS
        .iter()
        .map(|field| {
            (
                field.form_field.to_string(),
                serde_json::json!({
                    "form_field_type": field.form_field_type,
                    "display_name": field.display_name,
                }),
            )
        })
        .collect()
}
