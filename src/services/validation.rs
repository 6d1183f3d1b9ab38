//! 开场表单校验

use crate::error::IntroError;
use crate::models::Visitor;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// 邮箱是否满足 `x@y.z` 形式（各段不含空白与 @）
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// 校验姓名与邮箱，先查姓名再查邮箱，返回第一个失败项
///
/// 校验通过时原样保存输入，不做裁剪
pub fn validate_intro(name: &str, email: &str) -> Result<Visitor, IntroError> {
    if name.trim().is_empty() {
        return Err(IntroError::NameRequired);
    }

    if email.trim().is_empty() || !is_valid_email(email) {
        return Err(IntroError::InvalidEmail);
    }

    Ok(Visitor::new(name, email))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("maria@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.com.br"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("maria@example"));
        assert!(!is_valid_email("maria @example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("maria@@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_name_checked_before_email() {
        assert_eq!(validate_intro("   ", "bad"), Err(IntroError::NameRequired));
        assert_eq!(
            validate_intro("Maria", "bad"),
            Err(IntroError::InvalidEmail)
        );
    }

    #[test]
    fn test_valid_intro_creates_visitor() {
        let visitor = validate_intro("Maria Silva", "maria@example.com").unwrap();
        assert_eq!(visitor.name, "Maria Silva");
        assert_eq!(visitor.first_name(), "Maria");
    }
}
