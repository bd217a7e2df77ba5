//! Bearer tokens of the form `bs_v1_<uuid>.<secret hex>`.
//!
//! Only a SHA-256 verifier of the secret is stored, and it is bound to the role the token was
//! issued with.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::auth::Role;

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "bs";

const SECRET_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenVersion {
    V1,
}

impl ApiTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for ApiTokenVersion {
    type Error = ApiTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token uses an unsupported version")]
    UnsupportedVersion,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,

    #[error("api token role is unknown")]
    UnknownRole,
}

/// Secret half of a bearer token. Wiped on drop.
struct Secret([u8; SECRET_BYTES]);

impl Secret {
    fn generate() -> Self {
        let mut bytes = [0_u8; SECRET_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self(bytes)
    }

    fn to_hex(&self) -> String {
        self.0.iter().map(|byte| format!("{byte:02x}")).collect()
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != SECRET_BYTES * 2 {
            return None;
        }

        let mut bytes = [0_u8; SECRET_BYTES];
        let mut digits = hex.chars().map(|c| c.to_digit(16));

        for byte in &mut bytes {
            let hi = digits.next().flatten()?;
            let lo = digits.next().flatten()?;

            *byte = u8::try_from((hi << 4) | lo).ok()?;
        }

        Some(Self(bytes))
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// A bearer token as handed to a client.
pub struct BearerToken {
    pub token_uuid: Uuid,
    pub version: ApiTokenVersion,
    secret: Secret,
}

impl BearerToken {
    /// A fresh V1 token with a random secret.
    #[must_use]
    pub fn generate(token_uuid: Uuid) -> Self {
        Self {
            token_uuid,
            version: ApiTokenVersion::V1,
            secret: Secret::generate(),
        }
    }

    /// The string shown to the client once, at issue time.
    #[must_use]
    pub fn reveal(&self) -> String {
        format!(
            "{API_TOKEN_PREFIX}_{}_{}.{}",
            self.version.segment(),
            self.token_uuid.simple(),
            self.secret.to_hex()
        )
    }

    /// Hex SHA-256 of `{uuid}:{version}:{role}:{secret hex}`.
    #[must_use]
    pub fn verifier(&self, role: Role) -> String {
        let mut secret = self.secret.to_hex();

        let mut input = format!(
            "{}:{}:{}:{secret}",
            self.token_uuid.simple(),
            self.version.as_i16(),
            role.as_str(),
        );

        secret.zeroize();
        let digest = Sha256::digest(input.as_bytes());
        input.zeroize();

        format!("{digest:x}")
    }

    /// Compare against a stored verifier without exiting early on the first differing byte.
    #[must_use]
    pub fn matches(&self, role: Role, stored: &str) -> bool {
        let computed = self.verifier(role);

        computed.len() == stored.len()
            && computed
                .bytes()
                .zip(stored.bytes())
                .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
                == 0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("token_uuid", &self.token_uuid)
            .field("version", &self.version)
            .field("secret", &"**redacted**")
            .finish()
    }
}

impl FromStr for BearerToken {
    type Err = ApiTokenError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (id, secret) = token.split_once('.').ok_or(ApiTokenError::InvalidFormat)?;

        let (version, token_uuid) = id
            .strip_prefix(API_TOKEN_PREFIX)
            .and_then(|rest| rest.strip_prefix('_'))
            .and_then(|rest| rest.split_once('_'))
            .ok_or(ApiTokenError::InvalidFormat)?;

        let version = match version {
            "v1" => ApiTokenVersion::V1,
            _ => return Err(ApiTokenError::UnsupportedVersion),
        };

        Ok(Self {
            token_uuid: Uuid::try_parse(token_uuid).map_err(|_| ApiTokenError::InvalidFormat)?,
            version,
            secret: Secret::from_hex(secret).ok_or(ApiTokenError::InvalidSecretEncoding)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn token(fill: u8) -> BearerToken {
        BearerToken {
            token_uuid: Uuid::nil(),
            version: ApiTokenVersion::V1,
            secret: Secret([fill; SECRET_BYTES]),
        }
    }

    #[test]
    fn revealed_tokens_parse_back() -> TestResult {
        let issued = BearerToken::generate(Uuid::now_v7());
        let revealed = issued.reveal();

        let parsed: BearerToken = revealed.parse()?;

        assert!(revealed.starts_with("bs_v1_"), "unexpected token shape: {revealed}");
        assert_eq!(parsed.token_uuid, issued.token_uuid);
        assert_eq!(parsed.version, ApiTokenVersion::V1);
        assert_eq!(parsed.secret.0, issued.secret.0);

        Ok(())
    }

    #[test]
    fn secrets_accept_either_hex_case() -> TestResult {
        let parsed: BearerToken = format!(
            "bs_v1_{}.{}",
            Uuid::nil().simple(),
            "aB".repeat(SECRET_BYTES)
        )
        .parse()?;

        assert_eq!(parsed.secret.0, [0xAB; SECRET_BYTES]);

        Ok(())
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let nil = Uuid::nil().simple().to_string();
        let secret = "ab".repeat(SECRET_BYTES);

        for (raw, expected) in [
            (format!("nope_v1_{nil}.{secret}"), "format"),
            (format!("bs_v1_{nil}"), "format"),
            (format!("bs_v1_not-a-uuid.{secret}"), "format"),
            (format!("bs_v9_{nil}.{secret}"), "version"),
            (format!("bs_v1_{nil}.abcd"), "secret"),
            (format!("bs_v1_{nil}.{}", "zz".repeat(SECRET_BYTES)), "secret"),
        ] {
            let result = raw.parse::<BearerToken>();

            let matched = match expected {
                "format" => matches!(result, Err(ApiTokenError::InvalidFormat)),
                "version" => matches!(result, Err(ApiTokenError::UnsupportedVersion)),
                _ => matches!(result, Err(ApiTokenError::InvalidSecretEncoding)),
            };

            assert!(matched, "{raw}: expected {expected} error, got {result:?}");
        }
    }

    #[test]
    fn verifiers_are_deterministic_and_bound_to_role() {
        let token = token(0xCD);

        let admin = token.verifier(Role::Admin);

        assert_eq!(admin, token.verifier(Role::Admin));
        assert_eq!(admin.len(), 64, "verifier is a hex sha256 digest");
        assert!(token.matches(Role::Admin, &admin));
        assert!(!token.matches(Role::Customer, &admin), "roles must not share verifiers");
        assert!(!self::token(0xCE).matches(Role::Admin, &admin));
        assert!(!token.matches(Role::Admin, &admin[..63]));
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let rendered = format!("{:?}", token(0xAB));

        assert!(rendered.contains("redacted"));
        assert!(!rendered.contains("abab"));
    }
}
