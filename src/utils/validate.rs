use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{2,16}$").expect("Invalid code regex"));

/// 名称最大字符数
pub const MAX_NAME_LENGTH: usize = 128;

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 院系、科目代码：2-16 位字母、数字、下划线或连字符
pub fn validate_code(code: &str) -> Result<(), &'static str> {
    if !CODE_RE.is_match(code) {
        return Err(
            "Code must be 2-16 characters of letters, numbers, underscores or hyphens",
        );
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name must not be empty");
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err("Name is too long");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("ada@school.edu").is_ok());
        assert!(validate_email("first.last+tag@dept.school.org").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_code() {
        assert!(validate_code("CS").is_ok());
        assert!(validate_code("MATH-101").is_ok());
        assert!(validate_code("C").is_err());
        assert!(validate_code("has space").is_err());
        assert!(validate_code("ABCDEFGHIJKLMNOPQ").is_err());
    }

    #[test]
    fn test_name() {
        assert!(validate_name("Linear Algebra").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }
}
