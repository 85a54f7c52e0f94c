//! Human-readable byte sizes
//!
//! Uses SI (base 1000) units: values under ten keep one decimal place,
//! larger values are rounded to a whole number (ties to even).

const UNITS: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];

/// Formats a byte count, e.g. `1500` → `"1.5 kB"`, `44479` → `"44 kB"`
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 10 {
        return format!("{} B", bytes);
    }

    let bytes = u128::from(bytes);
    let mut exponent = 0;
    let mut scale: u128 = 1;
    while exponent + 1 < UNITS.len() && bytes >= scale * 1000 {
        scale *= 1000;
        exponent += 1;
    }

    // Value in tenths of the unit, rounded half up
    let tenths = (bytes * 10 + scale / 2) / scale;
    let unit = UNITS[exponent];

    if tenths < 100 {
        return format!("{}.{} {}", tenths / 10, tenths % 10, unit);
    }

    let mut whole = tenths / 10;
    let remainder = tenths % 10;
    if remainder > 5 || (remainder == 5 && whole % 2 == 1) {
        whole += 1;
    }
    format!("{} {}", whole, unit)
}

/// Formats a possibly negative byte count, treating negatives as zero
pub fn format_signed_bytes(bytes: i64) -> String {
    format_bytes(u64::try_from(bytes).unwrap_or(0))
}
