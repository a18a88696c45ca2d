//! Human-readable duration formatting for alerts

/// Format a duration in seconds as `"45s"`, `"2m 5s"` or `"1h 2m"`.
/// All components are integer-truncated, never rounded.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{}s", seconds as u64)
    } else if seconds < 3600.0 {
        let minutes = (seconds / 60.0) as u64;
        let secs = (seconds % 60.0) as u64;
        format!("{minutes}m {secs}s")
    } else {
        let hours = (seconds / 3600.0) as u64;
        let minutes = ((seconds % 3600.0) / 60.0) as u64;
        format!("{hours}h {minutes}m")
    }
}
