use chrono::{DateTime, Utc};

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count in human-readable binary units (B, KB, ... PB)
pub fn format_bytes(bytes: f64) -> String {
    let mut n = bytes.max(0.0);
    for unit in UNITS {
        if n < 1024.0 {
            return format!("{:.1}{}", n, unit);
        }
        n /= 1024.0;
    }
    format!("{:.1}PB", n)
}

/// Format a per-second byte rate
pub fn format_rate(bytes_per_sec: f64) -> String {
    format!("{}/s", format_bytes(bytes_per_sec))
}

/// ISO-8601 UTC timestamp with microseconds and a `Z` suffix
pub fn utc_timestamp(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}
