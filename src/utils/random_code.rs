use rand::Rng;

const UPPER_ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const MIXED_ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// 生成指定长度的随机字母数字码
pub fn generate_random_code(length: usize, uppercase: bool) -> String {
    let charset = if uppercase {
        UPPER_ALPHANUMERIC
    } else {
        MIXED_ALPHANUMERIC
    };
    let mut rng = rand::rng();
    (0..length)
        .map(|_| charset[rng.random_range(0..charset.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_and_charset() {
        let code = generate_random_code(8, true);
        assert_eq!(code.len(), 8);
        assert!(
            code.chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_mixed_case_is_alphanumeric() {
        let code = generate_random_code(32, false);
        assert_eq!(code.len(), 32);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_zero_length() {
        assert!(generate_random_code(0, true).is_empty());
    }
}
