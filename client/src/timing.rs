//! Human-readable durations for timing diagnostics.

use std::time::Duration;

#[allow(clippy::float_cmp)]
fn plural(count: f64) -> &'static str {
    if count == 1.0 { "" } else { "s" }
}

/// Format a duration as "H hours, M minutes, S seconds", leaving out hours and
/// minutes when they are zero. With `high_precision` the seconds keep six
/// decimal places, otherwise they are whole. With `report_total_seconds` a
/// duration over a minute also gets the total in seconds appended.
#[must_use]
pub fn format_duration(
    duration: Duration,
    report_total_seconds: bool,
    high_precision: bool,
) -> String {
    let whole_seconds = duration.as_secs();
    let hours = whole_seconds / 3600;
    let minutes = (whole_seconds % 3600) / 60;

    #[allow(clippy::cast_precision_loss)]
    let (total_seconds, seconds) = if high_precision {
        let total = duration.as_secs_f64();
        (total, total - (hours * 3600 + minutes * 60) as f64)
    } else {
        (whole_seconds as f64, (whole_seconds % 60) as f64)
    };

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{hours} hour{}", if hours == 1 { "" } else { "s" }));
    }
    if minutes > 0 {
        parts.push(format!("{minutes} minute{}", if minutes == 1 { "" } else { "s" }));
    }
    if high_precision {
        parts.push(format!("{seconds:.6} second{}", plural(seconds)));
    } else {
        parts.push(format!("{seconds} second{}", plural(seconds)));
    }

    let mut out = parts.join(", ");
    if report_total_seconds && total_seconds > 60.0 {
        let total = if high_precision {
            format!("{total_seconds:.6}")
        } else {
            format!("{total_seconds}")
        };
        out.push_str(&format!(", ({total} second{})", plural(total_seconds)));
    }
    out
}
