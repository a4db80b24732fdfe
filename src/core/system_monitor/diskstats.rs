//! Cumulative disk operation counters.
//!
//! sysinfo reports bytes but not operation counts. On Linux they come from
//! `/proc/diskstats`; other platforms report `None`.

/// Sum completed reads and writes over whole devices.
///
/// `is_whole_device` filters out partitions so a partition and its parent disk
/// are not counted twice.
pub fn parse_diskstats<F>(text: &str, is_whole_device: F) -> (u64, u64)
where
    F: Fn(&str) -> bool,
{
    let mut reads = 0u64;
    let mut writes = 0u64;

    for line in text.lines() {
        // major minor name reads_completed reads_merged sectors_read ms_reading writes_completed ...
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 8 {
            continue;
        }
        let name = fields[2];
        if name.starts_with("loop") || name.starts_with("ram") || !is_whole_device(name) {
            continue;
        }
        if let (Ok(r), Ok(w)) = (fields[3].parse::<u64>(), fields[7].parse::<u64>()) {
            reads = reads.saturating_add(r);
            writes = writes.saturating_add(w);
        }
    }

    (reads, writes)
}

#[cfg(target_os = "linux")]
pub fn read_operation_counts() -> Option<(u64, u64)> {
    use std::path::Path;

    let text = std::fs::read_to_string("/proc/diskstats").ok()?;
    Some(parse_diskstats(&text, |name| {
        Path::new("/sys/block").join(name).exists()
    }))
}

#[cfg(not(target_os = "linux"))]
pub fn read_operation_counts() -> Option<(u64, u64)> {
    None
}
