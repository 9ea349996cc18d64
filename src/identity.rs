use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Keyed identity hash for the chat widget: HMAC-SHA256 over the user id,
/// hex encoded. The widget's backend recomputes the same hash to verify
/// that identify calls really came from this server.
pub fn verification_hash(secret: &str, user_id: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take a key of any size");
    mac.update(user_id.as_bytes());
    format!("{:x}", mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vector() {
        assert_eq!(
            verification_hash("test-secret", "user-42"),
            "86a7fc2883ace458e6fe1fb45d4672e7a35adc38383b0e1b0870cd6a42d1ddd8"
        );
    }

    #[test]
    fn reference_vector() {
        // Public HMAC-SHA256 test vector.
        assert_eq!(
            verification_hash("key", "The quick brown fox jumps over the lazy dog"),
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }

    #[test]
    fn deterministic_per_user() {
        assert_eq!(
            verification_hash("secret", "alice"),
            verification_hash("secret", "alice")
        );
    }

    #[test]
    fn distinct_users_and_secrets_diverge() {
        assert_ne!(
            verification_hash("secret", "alice"),
            verification_hash("secret", "bob")
        );
        assert_ne!(
            verification_hash("secret-a", "alice"),
            verification_hash("secret-b", "alice")
        );
    }

    #[test]
    fn output_is_lowercase_hex() {
        let hash = verification_hash("secret", "alice");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
