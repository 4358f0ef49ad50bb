//! src/util/humanize.rs

/// Uptime label: the offline label at zero, hours under a day, otherwise
/// days and remaining hours.
#[must_use]
pub fn format_uptime(hours: u32, offline_label: &str) -> String {
    match hours {
        0 => offline_label.to_string(),
        h if h < 24 => format!("{h}h"),
        h => format!("{}d {}h", h / 24, h % 24),
    }
}

/// Storage label scaled to TB once it reaches 1000 GB.
#[must_use]
pub fn format_storage_gb(gb: u32) -> String {
    if gb < 1000 {
        return format!("{gb} GB");
    }

    let tb = f64::from(gb) / 1000.0;
    if gb % 1000 == 0 {
        format!("{tb:.0} TB")
    } else {
        format!("{tb:.1} TB")
    }
}
