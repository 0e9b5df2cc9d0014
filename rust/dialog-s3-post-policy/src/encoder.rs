//! Canonical rendering of a POST policy document.
//!
//! The document is rendered as
//!
//! ```text
//! { "expiration": "2015-12-30T12:00:00.000Z",
//!   "conditions": [
//!     {"bucket": "sigv4examplebucket"},
//!     ["starts-with", "$key", "user/user1/"],
//!     ["content-length-range", 0, 1048576],
//!     {"x-amz-algorithm": "AWS4-HMAC-SHA256"}
//!   ]
//! }
//! ```
//!
//! and then base64 encoded. The encoded string is what gets signed and what
//! the browser submits as the `policy` form field.

use std::fmt::{Display, Formatter};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::{Condition, PostPolicy};

/// Signing algorithm announced in every policy.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

const ELEMENT_INDENT: &str = "    ";
const ELEMENT_SEPARATOR: &str = ",\n";

/// The credential conditions every signed policy carries.
///
/// These are supplied alongside the policy when encoding rather than stored
/// in it, so encoding never changes the caller's conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialFields {
    /// Credential scope, `{access key id}/{date}/{region}/s3/aws4_request`
    pub credential: String,
    /// Signing time as `YYYYMMDDThhmmssZ`
    pub date: String,
}

impl CredentialFields {
    /// Form field names and values, in the order they are rendered.
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            ("x-amz-algorithm", ALGORITHM),
            ("x-amz-credential", self.credential.as_str()),
            ("x-amz-date", self.date.as_str()),
        ]
    }

    fn contains_key(&self, key: &str) -> bool {
        self.entries().iter().any(|(name, _)| *name == key)
    }
}

/// A base64 encoded policy document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPolicy(String);

impl EncodedPolicy {
    /// The encoded document.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode back to the rendered JSON bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.0)
    }
}

impl AsRef<[u8]> for EncodedPolicy {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Display for EncodedPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EncodedPolicy> for String {
    fn from(policy: EncodedPolicy) -> Self {
        policy.0
    }
}

/// Render the policy document as JSON text.
///
/// The credential fields are emitted after the policy's own conditions and
/// take precedence over any condition with the same key.
pub fn render(policy: &PostPolicy, fields: &CredentialFields) -> String {
    let mut document = String::from("{ \"expiration\": ");
    document.push('"');
    document.push_str(&crate::time::expiration(policy.expiration()));
    document.push('"');
    document.push_str(ELEMENT_SEPARATOR);
    document.push_str("  \"conditions\": [\n");

    let own = policy
        .conditions()
        .iter()
        .filter(|(key, _)| !fields.contains_key(key));

    for (key, condition) in own {
        push_element(&mut document, key, condition);
    }

    for (key, value) in fields.entries() {
        push_element(&mut document, key, &Condition::Exact(value.to_string()));
    }

    let end = document.trim_end_matches([',', ' ', '\n', '\t']).len();
    document.truncate(end);
    document.push_str("\n  ]\n}");

    document
}

/// Render the policy document and base64 encode it.
pub fn encode(policy: &PostPolicy, fields: &CredentialFields) -> EncodedPolicy {
    EncodedPolicy(STANDARD.encode(render(policy, fields)))
}

fn push_element(document: &mut String, key: &str, condition: &Condition) {
    match element(key, condition) {
        Ok(element) => {
            document.push_str(ELEMENT_INDENT);
            document.push_str(&element);
            document.push_str(ELEMENT_SEPARATOR);
        }
        Err(error) => {
            tracing::warn!(key, %error, "Omitting policy condition that failed to serialize");
        }
    }
}

fn element(key: &str, condition: &Condition) -> Result<String, serde_json::Error> {
    Ok(match condition {
        Condition::Exact(value) => format!("{{{}: {}}}", quote(key)?, quote(value)?),
        Condition::Rule(kind, value) => format!(
            "[{}, {}, {}]",
            quote(kind.as_str())?,
            quote(&format!("${}", key))?,
            quote(value)?
        ),
        Condition::Range(min, max) => format!("[{}, {}, {}]", quote(key)?, min, max),
    })
}

fn quote(text: &str) -> Result<String, serde_json::Error> {
    serde_json::to_string(text)
}
