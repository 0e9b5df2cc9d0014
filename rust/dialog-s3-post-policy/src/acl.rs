//! Canned access control lists for uploaded objects.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::PolicyError;

/// S3 Access Control List (ACL) settings.
///
/// These are canned ACLs supported by S3 and S3-compatible services.
/// See: https://docs.aws.amazon.com/AmazonS3/latest/userguide/acl-overview.html#canned-acl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Acl {
    /// Owner gets FULL_CONTROL. No one else has access rights.
    #[default]
    Private,
    /// Owner gets FULL_CONTROL. The AllUsers group gets READ access.
    PublicRead,
    /// Owner gets FULL_CONTROL. The AllUsers group gets READ and WRITE access.
    PublicReadWrite,
    /// Owner gets FULL_CONTROL. Amazon EC2 gets READ access to GET an AMI bundle.
    AwsExecRead,
    /// Owner gets FULL_CONTROL. The AuthenticatedUsers group gets READ access.
    AuthenticatedRead,
    /// Object owner gets FULL_CONTROL. Bucket owner gets READ access.
    BucketOwnerRead,
    /// Both the object owner and the bucket owner get FULL_CONTROL.
    BucketOwnerFullControl,
    /// The LogDelivery group gets WRITE and READ_ACP permissions on the bucket.
    LogDeliveryWrite,
}

impl Acl {
    /// Get the S3 ACL header value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::PublicRead => "public-read",
            Self::PublicReadWrite => "public-read-write",
            Self::AwsExecRead => "aws-exec-read",
            Self::AuthenticatedRead => "authenticated-read",
            Self::BucketOwnerRead => "bucket-owner-read",
            Self::BucketOwnerFullControl => "bucket-owner-full-control",
            Self::LogDeliveryWrite => "log-delivery-write",
        }
    }
}

impl Display for Acl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Acl {
    type Err = PolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "private" => Ok(Self::Private),
            "public-read" => Ok(Self::PublicRead),
            "public-read-write" => Ok(Self::PublicReadWrite),
            "aws-exec-read" => Ok(Self::AwsExecRead),
            "authenticated-read" => Ok(Self::AuthenticatedRead),
            "bucket-owner-read" => Ok(Self::BucketOwnerRead),
            "bucket-owner-full-control" => Ok(Self::BucketOwnerFullControl),
            "log-delivery-write" => Ok(Self::LogDeliveryWrite),
            other => Err(PolicyError::InvalidAcl(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_canned_acl_tokens() {
        assert_eq!("public-read".parse::<Acl>(), Ok(Acl::PublicRead));
        assert_eq!(
            "bucket-owner-full-control".parse::<Acl>(),
            Ok(Acl::BucketOwnerFullControl)
        );
    }

    #[test]
    fn it_defaults_to_private() {
        assert_eq!(Acl::default().to_string(), "private");
    }

    #[test]
    fn it_rejects_unknown_acl() {
        assert_eq!(
            "world-writable".parse::<Acl>(),
            Err(PolicyError::InvalidAcl("world-writable".into()))
        );
    }
}
