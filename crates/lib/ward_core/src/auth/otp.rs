//! One-time pin generation and expiry.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Pins expire after this many whole minutes have elapsed.
pub const OTP_EXPIRY_MINUTES: i64 = 10;

/// Generate a 6-digit one-time pin, zero-padded.
pub fn generate_pin() -> String {
    let n: u32 = rand::rng().random_range(0..1_000_000);
    format!("{n:06}")
}

/// Whether a pin issued at `generated_at` has expired by `now`.
///
/// Elapsed time is truncated to whole minutes before comparison, and the
/// boundary is strictly greater-than: a pin is still accepted at exactly
/// ten minutes, and at 10m59s, but rejected from 11m00s.
pub fn is_expired(generated_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    let elapsed_minutes = (now - generated_at).num_seconds() / 60;
    elapsed_minutes > OTP_EXPIRY_MINUTES
}
