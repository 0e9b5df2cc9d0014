//! Clock sampling and the timestamp layouts used by POST policies.

use chrono::{DateTime, Utc};

/// Layout of the policy `expiration` field, e.g. `2015-12-30T12:00:00.000Z`.
const EXPIRATION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Layout of the `x-amz-date` field, e.g. `20151229T000000Z`.
const AMZ_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Layout of the date component of a credential scope, e.g. `20151229`.
const SCOPE_DATE_FORMAT: &str = "%Y%m%d";

/// Get the current time as a UTC datetime.
#[cfg(not(target_arch = "wasm32"))]
pub fn now() -> DateTime<Utc> {
    DateTime::<Utc>::from(std::time::SystemTime::now())
}

/// Get the current time as a UTC datetime.
#[cfg(target_arch = "wasm32")]
pub fn now() -> DateTime<Utc> {
    use web_time::web::SystemTimeExt;
    DateTime::<Utc>::from(web_time::SystemTime::now().to_std())
}

pub(crate) fn expiration(time: &DateTime<Utc>) -> String {
    time.format(EXPIRATION_FORMAT).to_string()
}

pub(crate) fn amz_date(time: &DateTime<Utc>) -> String {
    time.format(AMZ_DATE_FORMAT).to_string()
}

pub(crate) fn scope_date(time: &DateTime<Utc>) -> String {
    time.format(SCOPE_DATE_FORMAT).to_string()
}
