//! Time and date parsing utilities.

use chrono::NaiveDateTime;

/// Timestamp format used by the EVE API for key expiry.
pub const EVE_API_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses a key expiry timestamp as reported by the EVE API.
///
/// An absent or empty value means the key never expires. A malformed value is logged and
/// treated as no expiry rather than failing the pull.
///
/// # Arguments
/// - `raw` - The `expires` field of an `APIKeyInfo` payload, if present
///
/// # Returns
/// - `Some(NaiveDateTime)` - Expiry timestamp in UTC
/// - `None` - No expiry, or the value could not be parsed
pub fn parse_expires(raw: Option<&str>) -> Option<NaiveDateTime> {
    let raw = raw.map(str::trim).filter(|raw| !raw.is_empty())?;

    match NaiveDateTime::parse_from_str(raw, EVE_API_DATETIME_FORMAT) {
        Ok(expires) => Some(expires),
        Err(e) => {
            tracing::warn!(expires = %raw, "Malformed key expiry timestamp, treating as no expiry: {}", e);

            None
        }
    }
}
