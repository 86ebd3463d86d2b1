//! Deterministic fake-value generators.
//!
//! Every generator is a pure function of its input text: the same original
//! value yields the same substitute in every column, every run and every
//! input format.

use std::sync::LazyLock;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use regex::Regex;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Number of digits in an AWS account identifier.
pub const ACCOUNT_ID_DIGITS: usize = 12;

/// Width of the decimal digest produced by [`hash_value`].
pub const HASH_WIDTH: usize = 20;

/// `arn:<partition>:<service>:<region>:<account-id>:<resource>`
static ARN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^arn:([^:]+):([^:]*):([^:]*):([^:]*):(.+)$").expect("Invalid ARN regex")
});

fn sha256(text: &str) -> [u8; 32] {
    let digest = Sha256::digest(text.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    bytes
}

/// Returns a fake 12-digit account id derived from `original`.
///
/// A ChaCha8 generator is seeded with the SHA-256 digest of the input and
/// built fresh on every call, so no state is shared between calls.
/// Collisions between different inputs are possible and accepted.
///
/// # Examples
///
/// ```
/// use anon_transform::fake_account_id;
///
/// let fake = fake_account_id("123456789012");
/// assert_eq!(fake.len(), 12);
/// assert_eq!(fake, fake_account_id("123456789012"));
/// ```
pub fn fake_account_id(original: &str) -> String {
    let mut rng = ChaCha8Rng::from_seed(sha256(original));
    (0..ACCOUNT_ID_DIGITS)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Returns a version-5 UUID of `original` under the DNS namespace.
pub fn fake_uuid(original: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_DNS, original.as_bytes()).to_string()
}

/// Returns the account-id segment of an ARN, if it has a non-empty one.
pub fn arn_account_segment(arn: &str) -> Option<&str> {
    ARN_PATTERN
        .captures(arn)
        .and_then(|caps| caps.get(4))
        .map(|m| m.as_str())
        .filter(|account| !account.is_empty())
}

/// Replaces the account-id segment of `original_arn` with `fake_account`.
///
/// Inputs that do not parse as an ARN, or whose account segment is empty
/// (S3 buckets, for example), are returned unchanged.
///
/// # Examples
///
/// ```
/// use anon_transform::fake_arn;
///
/// assert_eq!(
///     fake_arn("arn:aws:iam::123456789012:user/Bob", "000000000000"),
///     "arn:aws:iam::000000000000:user/Bob"
/// );
/// assert_eq!(fake_arn("arn:aws:s3:::mybucket", "111111111111"), "arn:aws:s3:::mybucket");
/// ```
pub fn fake_arn(original_arn: &str, fake_account: &str) -> String {
    let Some(caps) = ARN_PATTERN.captures(original_arn) else {
        return original_arn.to_string();
    };
    if caps[4].is_empty() {
        return original_arn.to_string();
    }
    format!(
        "arn:{}:{}:{}:{}:{}",
        &caps[1], &caps[2], &caps[3], fake_account, &caps[5]
    )
}

/// One-way digest of `text`: the first 8 bytes of its SHA-256 as a
/// big-endian integer, zero-padded to 20 decimal digits.
pub fn hash_value(text: &str) -> String {
    let digest = sha256(text);
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    format!("{:0width$}", u64::from_be_bytes(prefix), width = HASH_WIDTH)
}
