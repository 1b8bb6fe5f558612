use crate::api::Time;

/// Short "how long ago" label for a timestamp, falling back to the absolute
/// date after a week
pub fn format_relative(t: Option<Time>, now: Time) -> String {
    let Some(t) = t else {
        return String::from("Just now");
    };
    // clocks disagree, don't show negative ages
    let seconds = (now - t).num_seconds().max(0);
    if seconds < 60 {
        return format!("{seconds}s ago");
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{days}d ago");
    }
    t.format("%Y-%m-%d %H:%M").to_string()
}
