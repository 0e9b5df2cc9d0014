//! AWS Signature Version 4 key derivation and policy signing.
//!
//! See [Calculating a signature] for the derivation chain.
//!
//! [Calculating a signature]: https://docs.aws.amazon.com/AmazonS3/latest/API/sig-v4-authenticating-requests.html

use std::fmt::{Debug, Display, Formatter, Write};

use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Service name bound into every signing key.
pub const SERVICE: &str = "s3";

/// Final component of every credential scope.
pub const TERMINATOR: &str = "aws4_request";

/// AWS SigV4 signing key derived from a secret access key.
///
/// The key is derived through an HMAC chain:
/// `HMAC(HMAC(HMAC(HMAC("AWS4" + secret, date), region), "s3"), "aws4_request")`
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey([u8; 32]);

impl SigningKey {
    /// Derive a signing key for `date` (`YYYYMMDD`) and `region`.
    pub fn derive(secret: &str, date: &str, region: &str) -> Self {
        let secret = format!("AWS4{}", secret);
        let date_key = hmac(secret.as_bytes(), date.as_bytes());
        let region_key = hmac(&date_key, region.as_bytes());
        let service_key = hmac(&region_key, SERVICE.as_bytes());
        Self(hmac(&service_key, TERMINATOR.as_bytes()))
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Sign `document` with this key.
    pub fn sign(&self, document: &[u8]) -> Signature {
        Signature(hmac(&self.0, document))
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey(..)")
    }
}

/// AWS SigV4 signature.
///
/// Displays as 64 lowercase hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; 32]);

impl Signature {
    /// The raw signature bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex_encode(&self.0))
    }
}

/// Derive the signing key for `secret`, `date` (`YYYYMMDD`) and `region`.
pub fn derive_signing_key(secret: &str, date: &str, region: &str) -> SigningKey {
    SigningKey::derive(secret, date, region)
}

/// Sign `document` with `key`.
pub fn sign(document: impl AsRef<[u8]>, key: &SigningKey) -> Signature {
    key.sign(document.as_ref())
}

/// Compute HMAC-SHA256.
fn hmac(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(key).expect("HMAC-SHA256 accepts keys of any size");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// Hex-encode bytes.
fn hex_encode(bytes: &[u8]) -> String {
    let mut result = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        write!(result, "{:02x}", byte).unwrap();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY";

    #[test]
    fn it_derives_known_signing_key() {
        let key = SigningKey::derive(SECRET, "20151229", "us-east-1");

        assert_eq!(
            hex_encode(key.as_bytes()),
            "cbcef1ebeaefc82cce6530b9f0a9ae598846065f5c5bae0674bd5ebc4ba52d28"
        );
    }

    #[test]
    fn it_derives_same_key_every_time() {
        assert_eq!(
            derive_signing_key(SECRET, "20151229", "us-east-1"),
            derive_signing_key(SECRET, "20151229", "us-east-1")
        );
    }

    #[test]
    fn it_scopes_key_to_date_and_region() {
        let key = derive_signing_key(SECRET, "20151229", "us-east-1");

        assert_ne!(key, derive_signing_key(SECRET, "20151230", "us-east-1"));
        assert_ne!(key, derive_signing_key(SECRET, "20151229", "eu-west-1"));
    }

    #[test]
    fn it_signs_as_lowercase_hex() {
        let key = derive_signing_key(SECRET, "20151229", "us-east-1");
        let signature = sign("policy", &key).to_string();

        assert_eq!(signature.len(), 64);
        assert!(
            signature
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
        assert_eq!(signature, sign("policy", &key).to_string());
    }

    #[test]
    fn it_accepts_empty_secret_and_document() {
        let key = derive_signing_key("", "", "");

        assert_eq!(
            sign("", &key).to_string(),
            "165c1277f1a3f8a312280d6e8e587a39d3484b719cc469868c2f56da496d0298"
        );
    }

    #[test]
    fn it_hex_encodes_with_leading_zeros() {
        assert_eq!(hex_encode(&[0x00, 0x0f, 0xa0, 0xff]), "000fa0ff");
        assert_eq!(hex_encode(&[]), "");
    }

    #[test]
    fn it_redacts_signing_key_in_debug_output() {
        let key = derive_signing_key(SECRET, "20151229", "us-east-1");

        assert_eq!(format!("{:?}", key), "SigningKey(..)");
    }
}
