//! Anti-forgery tokens for the movie form posts.
//!
//! A token is `{nonce}.{signature}` where the nonce is a random alphanumeric
//! string and the signature is the hex HMAC-SHA256 of the nonce under the
//! server secret. Tokens are stateless: any token signed with the current
//! secret is accepted.

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use crate::error::{AppError, AppResult};

/// Multipart field carrying the token.
pub const CSRF_FIELD: &str = "csrf_token";

/// Length of the random nonce part of a token.
const NONCE_LENGTH: usize = 32;

type HmacSha256 = Hmac<Sha256>;

/// Issues and verifies anti-forgery tokens.
pub struct CsrfGuard {
    secret: Vec<u8>,
}

impl CsrfGuard {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    /// Mint a fresh token for a form page.
    pub fn issue(&self) -> String {
        let nonce = random_alphanumeric(NONCE_LENGTH);
        let signature = encode_hex(&self.mac(&nonce).finalize().into_bytes());
        format!("{nonce}.{signature}")
    }

    /// Whether `token` was issued with this guard's secret.
    pub fn is_valid(&self, token: &str) -> bool {
        let Some((nonce, signature)) = token.split_once('.') else {
            return false;
        };
        let Some(signature) = decode_hex(signature) else {
            return false;
        };
        !nonce.is_empty() && self.mac(nonce).verify_slice(&signature).is_ok()
    }

    /// Reject the request unless it carries a valid token.
    pub fn verify(&self, token: Option<&str>) -> AppResult<()> {
        if token.is_some_and(|t| self.is_valid(t)) {
            Ok(())
        } else {
            tracing::warn!("Rejected form post with missing or invalid anti-forgery token");
            Err(AppError::BadRequest(
                "Missing or invalid anti-forgery token".into(),
            ))
        }
    }

    fn mac(&self, nonce: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length");
        mac.update(nonce.as_bytes());
        mac
    }
}

/// Random alphanumeric string, used for nonces and generated secrets.
pub fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn decode_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 || !s.is_ascii() {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}
