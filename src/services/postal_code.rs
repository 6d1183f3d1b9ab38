//! CEP 输入格式化
//!
//! 每次按键都会调用，结果必须幂等：对已格式化的值再次格式化得到相同结果

use crate::models::PostalCode;

/// CEP 数字位数
pub const POSTAL_CODE_DIGITS: usize = 8;

/// 只保留数字，最多 8 位
pub fn digits_of(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(POSTAL_CODE_DIGITS)
        .collect()
}

/// 格式化为 `DDDDD-DDD`；不足 6 位时不加连字符
pub fn format_postal_code(input: &str) -> String {
    let digits = digits_of(input);
    if digits.len() > 5 {
        let (head, tail) = digits.split_at(5);
        format!("{}-{}", head, tail)
    } else {
        digits
    }
}

/// 输入中包含完整 8 位数字时返回 CEP
pub fn parse_postal_code(input: &str) -> Option<PostalCode> {
    PostalCode::from_digits(&digits_of(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_examples() {
        assert_eq!(format_postal_code("12345678"), "12345-678");
        assert_eq!(format_postal_code("123"), "123");
        assert_eq!(format_postal_code("12345"), "12345");
        assert_eq!(format_postal_code("123456"), "12345-6");
        assert_eq!(format_postal_code(""), "");
    }

    #[test]
    fn test_format_strips_and_truncates() {
        assert_eq!(format_postal_code("01.310 100"), "01310-100");
        assert_eq!(format_postal_code("1234567890"), "12345-678");
        assert_eq!(format_postal_code("abc"), "");
    }

    #[test]
    fn test_format_is_idempotent() {
        for raw in ["12345-678", "12345678", "123", "12a34b5c6", "9999999999", "01310-1"] {
            let once = format_postal_code(raw);
            assert_eq!(format_postal_code(&once), once, "输入: {}", raw);
        }
    }

    #[test]
    fn test_parse_requires_eight_digits() {
        assert_eq!(
            parse_postal_code("01310-100").map(|c| c.to_string()),
            Some("01310-100".to_string())
        );
        assert!(parse_postal_code("12345-67").is_none());
    }
}
