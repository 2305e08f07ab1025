//! Human-readable duration formatting.

/// Format a duration as its coarsest two adjacent units, dropping zero
/// parts.
///
/// `8100` seconds becomes `"2 hr 15 min"`, a whole hour stays `"1 hr"`,
/// sub-minute durations fall through to `"{n} sec"`. Units never skip a
/// rank: `3605` seconds is `"1 hr"`, not `"1 hr 5 sec"`.
pub fn readable_duration(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        if minutes > 0 {
            format!("{hours} hr {minutes} min")
        } else {
            format!("{hours} hr")
        }
    } else if minutes > 0 {
        if seconds > 0 {
            format!("{minutes} min {seconds} sec")
        } else {
            format!("{minutes} min")
        }
    } else {
        format!("{seconds} sec")
    }
}
