//! Correlation id generation.

use rand::rngs::OsRng;
use rand::RngCore;

/// Hex digits per hyphen-separated group
const GROUP_LAYOUT: [usize; 5] = [8, 4, 4, 4, 12];

/// Fresh 128-bit random id in 8-4-4-4-12 layout
///
/// **Public** - used when a transaction has no cached id yet
pub fn generate_correlation_id() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);

    let hex = hex::encode(bytes);
    // 16 bytes always encode to 32 hex digits
    format_hex_groups(&hex).unwrap_or(hex)
}

/// Lay out 32 hex digits as `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`
///
/// Returns `None` when `hex` is not exactly 32 ASCII hex digits.
pub fn format_hex_groups(hex: &str) -> Option<String> {
    if hex.len() != 32 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let mut groups = Vec::with_capacity(GROUP_LAYOUT.len());
    let mut start = 0;
    for width in GROUP_LAYOUT {
        groups.push(&hex[start..start + width]);
        start += width;
    }

    Some(groups.join("-"))
}
