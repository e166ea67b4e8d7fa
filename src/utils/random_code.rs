use rand::Rng;
use rand::distr::Alphanumeric;

/// 生成学号：当前年份 + 8 位随机数字
pub fn generate_enrollment_number(year: i32) -> String {
    let mut rng = rand::rng();
    let digits: String = (0..8)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect();
    format!("{year}{digits}")
}

/// 生成随机密码，保证包含大小写字母和数字
pub fn generate_random_password(len: usize) -> String {
    let len = len.max(8);
    let mut rng = rand::rng();
    let mut password: String = (&mut rng)
        .sample_iter(&Alphanumeric)
        .take(len - 3)
        .map(char::from)
        .collect();
    password.push(char::from(b'A' + rng.random_range(0..26u8)));
    password.push(char::from(b'a' + rng.random_range(0..26u8)));
    password.push(char::from(b'0' + rng.random_range(0..10u8)));
    password
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrollment_number_shape() {
        let number = generate_enrollment_number(2025);
        assert_eq!(number.len(), 12);
        assert!(number.starts_with("2025"));
        assert!(number.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_random_password_meets_policy() {
        for _ in 0..20 {
            let password = generate_random_password(12);
            assert_eq!(password.len(), 12);
            assert!(crate::utils::validate::validate_password(&password).is_valid);
        }
    }
}
