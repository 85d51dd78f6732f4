//! Human-readable formatting for movie attributes.

/// Format a runtime in minutes as `"2h 19m"`, `"2h"`, or `"45m"`.
pub fn format_runtime(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{minutes}m");
    }
    let hours = minutes / 60;
    let rest = minutes % 60;
    if rest > 0 {
        format!("{hours}h {rest}m")
    } else {
        format!("{hours}h")
    }
}

/// Format a rating with one decimal, or `"-"` when unrated.
pub fn format_rating(rating: Option<f64>) -> String {
    rating.map_or_else(|| "-".to_string(), |r| format!("{r:.1}"))
}
