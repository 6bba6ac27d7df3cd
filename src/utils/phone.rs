use crate::error::{AppError, AppResult};
use regex::Regex;

/// 校验国际格式手机号 (+ 开头, 8-15 位数字)
pub fn validate_phone(phone: &str) -> AppResult<()> {
    let phone_regex = Regex::new(r"^\+\d{8,15}$").unwrap();

    if !phone_regex.is_match(phone) {
        return Err(AppError::ValidationError(
            "Invalid phone number, expected international format (+1234567890)".to_string(),
        ));
    }

    Ok(())
}

/// 格式化手机号为国际格式；无国家码时默认 +1
pub fn format_phone(phone: &str) -> String {
    let has_plus = phone.trim_start().starts_with('+');
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return phone.to_string();
    }

    if has_plus {
        format!("+{}", digits)
    } else if digits.len() == 11 && digits.starts_with('1') {
        format!("+{}", digits)
    } else {
        // 原始号码无国家码，默认美国区号
        format!("+1{}", digits.trim_start_matches('0'))
    }
}

/// WhatsApp Graph API 使用不带 + 的号码
pub fn phone_for_whatsapp(phone: &str) -> String {
    format_phone(phone).trim_start_matches('+').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+12345678901").is_ok());
        assert!(validate_phone("+521234567890").is_ok());
        assert!(validate_phone("12345678901").is_err());
        assert!(validate_phone("+123").is_err());
        assert!(validate_phone("+1234567x901").is_err());
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("2345678901"), "+12345678901");
        assert_eq!(format_phone("12345678901"), "+12345678901");
        assert_eq!(format_phone("+12345678901"), "+12345678901");
        assert_eq!(format_phone("(234) 567-8901"), "+12345678901");
        assert_eq!(format_phone("+52 123 456 7890"), "+521234567890");
    }

    #[test]
    fn test_local_numbers_pass_validation_after_formatting() {
        // 本地格式先归一化再校验, 不能直接按原始输入拒绝
        for raw in ["2345678901", "(234) 567-8901", "+52 123 456 7890"] {
            assert!(validate_phone(&format_phone(raw)).is_ok(), "{raw}");
        }
    }

    #[test]
    fn test_phone_for_whatsapp() {
        assert_eq!(phone_for_whatsapp("+1 (234) 567-8901"), "12345678901");
        assert_eq!(phone_for_whatsapp("2345678901"), "12345678901");
    }
}
