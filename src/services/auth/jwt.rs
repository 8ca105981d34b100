use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tokens live exactly one day.
pub const TOKEN_TTL_SECONDS: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    SignatureInvalid,

    #[error("token has expired")]
    Expired,
}

/// Identity claims carried by a token.
///
/// Wire names: `subject`, `username`, `role_name`, `iat`, `exp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub subject: i64,
    pub username: String,
    pub role_name: String,
    #[serde(rename = "iat")]
    pub issued_at: i64,
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl Claims {
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }
}

/// HS256 signer/verifier bound to the process secret.
///
/// Expiry is checked here against an explicit clock rather than by
/// `jsonwebtoken`, so there is no leeway and `verify_at` is testable.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .field("ttl_seconds", &TOKEN_TTL_SECONDS)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(
        &self,
        user_id: i64,
        username: &str,
        role_name: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(user_id, username, role_name, Utc::now())
    }

    pub fn issue_at(
        &self,
        user_id: i64,
        username: &str,
        role_name: &str,
        now: DateTime<Utc>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let issued_at = now.timestamp();
        let claims = Claims {
            subject: user_id,
            username: username.to_string(),
            role_name: role_name.to_string(),
            issued_at,
            expires_at: issued_at + TOKEN_TTL_SECONDS,
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, &claims, &self.encoding_key)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify signature and structure, then check expiry against `now`.
    ///
    /// A token is expired once `now >= exp`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        check_structure(token)?;

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::Base64(_) => TokenError::SignatureInvalid,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        if now.timestamp() >= data.claims.expires_at {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}

// Separate "not a JWS at all" from "signature does not match" before handing
// the token to jsonwebtoken, whose Base64 error does not say which segment failed.
fn check_structure(token: &str) -> Result<(), TokenError> {
    let mut parts = token.split('.');
    let (Some(header), Some(payload), Some(signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::Malformed);
    };

    for segment in [header, payload] {
        let bytes = URL_SAFE_NO_PAD
            .decode(segment)
            .map_err(|_| TokenError::Malformed)?;
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)?;
        if !value.is_object() {
            return Err(TokenError::Malformed);
        }
    }

    if signature.is_empty() || URL_SAFE_NO_PAD.decode(signature).is_err() {
        return Err(TokenError::SignatureInvalid);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    const SECRET: &str = "shh";

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn sample_token(codec: &TokenCodec) -> String {
        codec.issue_at(1, "bob", "admin", issued_at()).unwrap()
    }

    #[test]
    fn issue_then_verify_round_trips_claims() {
        let codec = TokenCodec::new(SECRET);
        let token = sample_token(&codec);

        let claims = codec.verify_at(&token, issued_at()).unwrap();
        assert_eq!(
            claims,
            Claims {
                subject: 1,
                username: "bob".into(),
                role_name: "admin".into(),
                issued_at: issued_at().timestamp(),
                expires_at: issued_at().timestamp() + 86_400,
            }
        );
    }

    #[test]
    fn repeated_verification_is_idempotent() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.issue(7, "sue", "student").unwrap();

        let first = codec.verify(&token).unwrap();
        let second = codec.verify(&token).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn wire_payload_uses_expected_claim_names() {
        let codec = TokenCodec::new(SECRET);
        let token = sample_token(&codec);
        let payload = token.split('.').nth(1).unwrap();
        let json: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();

        assert_eq!(json["subject"], 1);
        assert_eq!(json["username"], "bob");
        assert_eq!(json["role_name"], "admin");
        assert_eq!(
            json["exp"].as_i64().unwrap() - json["iat"].as_i64().unwrap(),
            86_400
        );
    }

    #[test]
    fn expiry_boundary() {
        let codec = TokenCodec::new(SECRET);
        let token = sample_token(&codec);
        let expiry = issued_at() + Duration::seconds(TOKEN_TTL_SECONDS);

        assert!(codec.verify_at(&token, expiry - Duration::seconds(1)).is_ok());
        assert_eq!(
            codec.verify_at(&token, expiry + Duration::seconds(1)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn altered_signature_is_rejected() {
        let codec = TokenCodec::new(SECRET);
        let token = sample_token(&codec);
        let (signed, signature) = token.rsplit_once('.').unwrap();

        let alphabet = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_=+/ ";

        for position in 0..signature.len() {
            for replacement in alphabet.chars() {
                let mut chars: Vec<char> = signature.chars().collect();
                if chars[position] == replacement {
                    continue;
                }
                chars[position] = replacement;
                let tampered = format!("{signed}.{}", chars.into_iter().collect::<String>());

                assert_eq!(
                    codec.verify_at(&tampered, issued_at()),
                    Err(TokenError::SignatureInvalid),
                    "position {position} -> {replacement:?}"
                );
            }
        }
    }

    #[test]
    fn extra_separator_in_signature_is_malformed() {
        let codec = TokenCodec::new(SECRET);
        let token = sample_token(&codec);
        let (signed, signature) = token.rsplit_once('.').unwrap();

        let tampered = format!("{signed}.{}.{}", &signature[..4], &signature[4..]);
        assert_eq!(
            codec.verify_at(&tampered, issued_at()),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn undecodable_signature_is_a_signature_failure() {
        let codec = TokenCodec::new(SECRET);
        let token = sample_token(&codec);
        let (signed, _) = token.rsplit_once('.').unwrap();

        assert_eq!(
            codec.verify_at(&format!("{signed}.!!!"), issued_at()),
            Err(TokenError::SignatureInvalid)
        );
        assert_eq!(
            codec.verify_at(&format!("{signed}."), issued_at()),
            Err(TokenError::SignatureInvalid)
        );
    }

    #[test]
    fn rewritten_payload_fails_signature_check() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.issue_at(2, "sue", "student", issued_at()).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let forged_payload = URL_SAFE_NO_PAD.encode(
            serde_json::json!({
                "subject": 2,
                "username": "sue",
                "role_name": "admin",
                "iat": issued_at().timestamp(),
                "exp": issued_at().timestamp() + 86_400,
            })
            .to_string(),
        );
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert_eq!(
            codec.verify_at(&forged, issued_at()),
            Err(TokenError::SignatureInvalid)
        );
    }

    #[test]
    fn other_secret_is_rejected() {
        let token = sample_token(&TokenCodec::new(SECRET));
        let other = TokenCodec::new("not-the-secret");
        assert_eq!(
            other.verify_at(&token, issued_at()),
            Err(TokenError::SignatureInvalid)
        );
    }

    #[test]
    fn malformed_inputs() {
        let codec = TokenCodec::new(SECRET);
        for token in ["", "abc", "a.b", "a.b.c.d", "eyJhbGciOiJIUzI1NiJ9.@@@.abc", "bm90.anNvbg.abc"] {
            assert_eq!(
                codec.verify_at(token, issued_at()),
                Err(TokenError::Malformed),
                "input: {token:?}"
            );
        }
    }
}
