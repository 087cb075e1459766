//! Basic credential decoding.
//!
//! Turns the token of an `Authorization: Basic <token>` header into an
//! `(identifier, secret)` pair. Every step returns `None` on bad input; no
//! decode error ever reaches the caller.
//!
//! Decoded text and secrets are held in `Zeroizing` buffers so the plaintext
//! password is wiped from this process's memory once the request is done.

use base64::{engine::general_purpose, Engine as _};
use zeroize::Zeroizing;

/// Header prefix for Basic credentials. Case-sensitive, one space.
pub const BASIC_PREFIX: &str = "Basic ";

/// Decoded Basic credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub identifier: String,
    pub secret: Zeroizing<String>,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Strip the `Basic ` prefix from an `Authorization` header value.
pub fn extract_base64_token(header: &str) -> Option<&str> {
    header.strip_prefix(BASIC_PREFIX)
}

/// Decode a standard Base64 token into UTF-8 text.
pub fn decode_base64_token(token: &str) -> Option<Zeroizing<String>> {
    let bytes = Zeroizing::new(general_purpose::STANDARD.decode(token).ok()?);
    let text = std::str::from_utf8(&bytes).ok()?;
    Some(Zeroizing::new(text.to_string()))
}

/// Split decoded text on the first `:` into identifier and secret.
///
/// Secrets may contain `:`. Text without any `:`, or with an empty
/// identifier or secret, yields `None`.
pub fn split_credentials(decoded: &str) -> Option<Credential> {
    let (identifier, secret) = decoded.split_once(':')?;
    if identifier.is_empty() || secret.is_empty() {
        return None;
    }
    Some(Credential {
        identifier: identifier.to_string(),
        secret: Zeroizing::new(secret.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(raw: &str) -> String {
        format!("Basic {}", general_purpose::STANDARD.encode(raw))
    }

    fn credential_from_header(header: &str) -> Option<Credential> {
        let token = extract_base64_token(header)?;
        let decoded = decode_base64_token(token)?;
        split_credentials(&decoded)
    }

    #[test]
    fn test_round_trip_email_and_secret() {
        let header = basic("alice@example.com:secret");
        let token = extract_base64_token(&header).unwrap();
        let decoded = decode_base64_token(token).unwrap();
        let credential = split_credentials(&decoded).unwrap();
        assert_eq!(credential.identifier, "alice@example.com");
        assert_eq!(credential.secret.as_str(), "secret");
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(extract_base64_token("Bearer xyz").is_none());
        assert!(extract_base64_token("basic abc").is_none());
        assert!(extract_base64_token("Basic").is_none());
        assert!(extract_base64_token("BasicAbc").is_none());
    }

    #[test]
    fn test_prefix_only_yields_empty_token() {
        assert_eq!(extract_base64_token("Basic "), Some(""));
    }

    #[test]
    fn test_invalid_base64_is_none() {
        assert!(decode_base64_token("not-base64!!!").is_none());
        assert!(credential_from_header("Basic not-base64!!!").is_none());
    }

    #[test]
    fn test_invalid_utf8_is_none() {
        let token = general_purpose::STANDARD.encode([0xff, 0xfe, 0x3a, 0x41]);
        assert!(decode_base64_token(&token).is_none());
    }

    #[test]
    fn test_missing_colon_is_none() {
        assert!(split_credentials("alice@example.com").is_none());
        assert!(credential_from_header(&basic("alice@example.com")).is_none());
    }

    #[test]
    fn test_empty_halves_are_none() {
        assert!(split_credentials(":").is_none());
        assert!(split_credentials("a:").is_none());
        assert!(split_credentials(":b").is_none());
        assert!(credential_from_header(&basic(":")).is_none());
        assert!(credential_from_header(&basic("alice@example.com:")).is_none());
        assert!(credential_from_header(&basic(":secret")).is_none());
    }

    #[test]
    fn test_secret_may_contain_colons() {
        let credential = credential_from_header(&basic("bob@example.com:a:b:c")).unwrap();
        assert_eq!(credential.identifier, "bob@example.com");
        assert_eq!(credential.secret.as_str(), "a:b:c");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let credential = split_credentials("bob@example.com:hunter2").unwrap();
        let printed = format!("{:?}", credential);
        assert!(printed.contains("bob@example.com"));
        assert!(!printed.contains("hunter2"));
    }
}
