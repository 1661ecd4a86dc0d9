//! 비밀번호 해싱 및 검증.
//!
//! Argon2id로 단방향 해시를 만들고 상수 시간으로 비교합니다.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// 비밀번호 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("비밀번호 해싱 실패")]
    HashingFailed,
}

/// 평문 비밀번호를 PHC 형식 해시 문자열로 변환합니다.
///
/// 솔트는 호출마다 새로 뽑습니다. 같은 평문을 두 번 해싱하면 서로 다른
/// 문자열이 나오지만 둘 다 원문에 대해 검증됩니다.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| PasswordError::HashingFailed)
}

/// 평문 비밀번호를 저장된 해시에 대해 검증합니다.
///
/// 해시 문자열이 깨져 있거나 백엔드가 실패해도 `false`를 돌려줍니다.
/// 호출자는 검증 실패의 원인을 구분할 수 없습니다.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_accepts_correct_password_only() {
        let hash = hash_password("secret1").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("secret1", &hash));
        assert!(!verify_password("secret2", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let first = hash_password("secret1").unwrap();
        let second = hash_password("secret1").unwrap();

        // 솔트가 매번 달라지므로 해시도 달라진다
        assert_ne!(first, second);
        assert!(verify_password("secret1", &first));
        assert!(verify_password("secret1", &second));
    }

    #[test]
    fn test_malformed_digest_verifies_false() {
        for bad in ["", "plain", "$argon2id$truncated", "$2b$12$bcrypt-ish"] {
            assert!(!verify_password("secret1", bad), "digest={:?}", bad);
        }
    }

    #[test]
    fn test_non_ascii_password() {
        let hash = hash_password("비밀번호🔑123").unwrap();
        assert!(verify_password("비밀번호🔑123", &hash));
        assert!(!verify_password("비밀번호123", &hash));
    }
}
