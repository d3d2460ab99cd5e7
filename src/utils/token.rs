use rand::RngCore;

/// Admin sessions live for 24 hours from issuance and are never refreshed.
pub const SESSION_LIFETIME_MS: i64 = 24 * 60 * 60 * 1000;

/// Opaque bearer token: 32 bytes from the thread CSPRNG, hex-encoded. No
/// collision check; the keyspace makes one negligible.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub fn session_expiry(issued_at_ms: i64) -> i64 {
    issued_at_ms + SESSION_LIFETIME_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_64_hex_chars() {
        let token = generate_session_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_do_not_repeat() {
        assert_ne!(generate_session_token(), generate_session_token());
    }

    #[test]
    fn expiry_is_24h_after_issuance() {
        assert_eq!(session_expiry(0), 86_400_000);
        assert_eq!(session_expiry(1_700_000_000_000), 1_700_086_400_000);
    }
}
