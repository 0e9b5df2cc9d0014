//! The POST policy under construction.

use chrono::{DateTime, TimeDelta, Utc};

use crate::{Acl, Condition, Conditions, MatchKind, PolicyError};

/// Hours a policy stays valid unless told otherwise.
pub const DEFAULT_EXPIRATION_HOURS: i64 = 24;

/// REST headers an upload form may be constrained on.
///
/// Header conditions for any other name are ignored.
pub const REST_HEADERS: [&str; 5] = [
    "Cache-Control",
    "Content-Type",
    "Content-Disposition",
    "Content-Encoding",
    "Expires",
];

/// Prefix of user-defined object metadata fields.
pub const USER_METADATA_PREFIX: &str = "x-amz-meta-";

/// Form field bounding the upload size in bytes.
pub const CONTENT_LENGTH_RANGE: &str = "content-length-range";

/// A POST policy describing what a browser upload form may contain.
///
/// A policy is built for a single upload authorization: populate it with
/// conditions, then hand it to [`Credentials::authorize`](crate::Credentials::authorize)
/// to obtain the encoded document and its signature.
///
/// The creation time (`now`) is captured when the policy is created and
/// determines the signing date and the credential scope.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use dialog_s3_post_policy::{MatchKind, PostPolicy};
///
/// let now = Utc.with_ymd_and_hms(2015, 12, 29, 0, 0, 0).unwrap();
/// let mut policy = PostPolicy::new(now).with_expiration_hours(36).unwrap();
///
/// policy.set_bucket("sigv4examplebucket");
/// policy.set_key_condition(MatchKind::StartsWith, "user/user1/");
/// policy.set_rest_header_condition(MatchKind::StartsWith, "Content-Type", "image/");
/// policy.set_content_length_range(0, 1_000_000).unwrap();
///
/// assert_eq!(policy.conditions().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPolicy {
    now: DateTime<Utc>,
    expiration: DateTime<Utc>,
    conditions: Conditions,
}

impl PostPolicy {
    /// Create an empty policy created at `now`.
    ///
    /// The policy expires [`DEFAULT_EXPIRATION_HOURS`] after `now`, or at the
    /// latest representable time when `now` is too close to it.
    pub fn new(now: DateTime<Utc>) -> Self {
        let expiration = TimeDelta::try_hours(DEFAULT_EXPIRATION_HOURS)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            now,
            expiration,
            conditions: Conditions::new(),
        }
    }

    /// Create an empty policy created at the current time.
    pub fn now() -> Self {
        Self::new(crate::time::now())
    }

    /// Set the expiration to `hours` after the creation time.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::ExpirationOutOfRange`] if the resulting time
    /// cannot be represented.
    pub fn with_expiration_hours(mut self, hours: i64) -> Result<Self, PolicyError> {
        let duration = TimeDelta::try_hours(hours).ok_or(PolicyError::ExpirationOutOfRange)?;
        self.expire_in(duration)?;
        Ok(self)
    }

    /// Set the expiration to `duration` after the creation time.
    ///
    /// On error the expiration is left unchanged.
    pub fn expire_in(&mut self, duration: TimeDelta) -> Result<(), PolicyError> {
        self.expiration = self
            .now
            .checked_add_signed(duration)
            .ok_or(PolicyError::ExpirationOutOfRange)?;
        Ok(())
    }

    /// Set an absolute expiration time.
    pub fn set_expiration(&mut self, expiration: DateTime<Utc>) {
        self.expiration = expiration;
    }

    /// Time the policy was created.
    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.now
    }

    /// Time after which the storage service rejects the policy.
    pub fn expiration(&self) -> &DateTime<Utc> {
        &self.expiration
    }

    /// The conditions set so far.
    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    /// Mutable access to the underlying conditions.
    pub fn conditions_mut(&mut self) -> &mut Conditions {
        &mut self.conditions
    }

    /// Look up the condition set for `key`.
    pub fn get(&self, key: &str) -> Result<&Condition, PolicyError> {
        self.conditions.get(key)
    }

    /// Require the upload to target `bucket`.
    pub fn set_bucket(&mut self, bucket: impl Into<String>) {
        self.conditions.set_exact("bucket", bucket);
    }

    /// Require the object to be stored under exactly `key`.
    pub fn set_key(&mut self, key: impl Into<String>) {
        self.conditions.set_exact("key", key);
    }

    /// Constrain the object key.
    pub fn set_key_condition(&mut self, kind: MatchKind, value: impl Into<String>) {
        self.conditions.set_match_rule(kind, "key", value);
    }

    /// Require a canned ACL given by name.
    ///
    /// An empty name selects `private`.
    pub fn set_acl(&mut self, acl: &str) {
        let acl = if acl.is_empty() {
            Acl::Private.as_str()
        } else {
            acl
        };
        self.conditions.set_exact("acl", acl);
    }

    /// Require a canned ACL.
    pub fn set_canned_acl(&mut self, acl: Acl) {
        self.conditions.set_exact("acl", acl.as_str());
    }

    /// Constrain the ACL.
    pub fn set_acl_condition(&mut self, kind: MatchKind, value: impl Into<String>) {
        self.conditions.set_match_rule(kind, "acl", value);
    }

    /// Require the browser to be redirected to `url` after a successful upload.
    pub fn set_success_action_redirect(&mut self, url: impl Into<String>) {
        self.conditions.set_exact("success_action_redirect", url);
    }

    /// Constrain the success redirect URL.
    pub fn set_success_action_redirect_condition(
        &mut self,
        kind: MatchKind,
        value: impl Into<String>,
    ) {
        self.conditions
            .set_match_rule(kind, "success_action_redirect", value);
    }

    /// Require the status code returned after a successful upload.
    pub fn set_success_action_status(&mut self, status: impl Into<String>) {
        self.conditions.set_exact("success_action_status", status);
    }

    /// Constrain the status code returned after a successful upload.
    pub fn set_success_action_status_condition(
        &mut self,
        kind: MatchKind,
        value: impl Into<String>,
    ) {
        self.conditions
            .set_match_rule(kind, "success_action_status", value);
    }

    /// Require a REST header value.
    ///
    /// Only the headers in [`REST_HEADERS`] can be constrained; other names
    /// leave the policy unchanged.
    pub fn set_rest_header(&mut self, header: &str, value: impl Into<String>) {
        if is_rest_header(header) {
            self.conditions.set_exact(header, value);
        } else {
            tracing::debug!(header, "Ignoring unsupported REST header");
        }
    }

    /// Constrain a REST header value.
    ///
    /// Only the headers in [`REST_HEADERS`] can be constrained; other names
    /// leave the policy unchanged.
    pub fn set_rest_header_condition(
        &mut self,
        kind: MatchKind,
        header: &str,
        value: impl Into<String>,
    ) {
        if is_rest_header(header) {
            self.conditions.set_match_rule(kind, header, value);
        } else {
            tracing::debug!(header, "Ignoring unsupported REST header");
        }
    }

    /// Require a user metadata value, stored as `x-amz-meta-{name}`.
    pub fn set_user_metadata(&mut self, name: &str, value: impl Into<String>) {
        self.conditions
            .set_exact(format!("{}{}", USER_METADATA_PREFIX, name), value);
    }

    /// Constrain a user metadata value, stored as `x-amz-meta-{name}`.
    pub fn set_user_metadata_condition(
        &mut self,
        kind: MatchKind,
        name: &str,
        value: impl Into<String>,
    ) {
        self.conditions
            .set_match_rule(kind, format!("{}{}", USER_METADATA_PREFIX, name), value);
    }

    /// Require an `x-amz-{name}` header value, e.g. `server-side-encryption`.
    pub fn set_amz_header(&mut self, name: &str, value: impl Into<String>) {
        self.conditions.set_exact(format!("x-amz-{}", name), value);
    }

    /// Bound the upload size to `min..=max` bytes.
    pub fn set_content_length_range(&mut self, min: i64, max: i64) -> Result<(), PolicyError> {
        self.conditions.set_range(CONTENT_LENGTH_RANGE, min, max)
    }
}

fn is_rest_header(header: &str) -> bool {
    REST_HEADERS.contains(&header)
}
