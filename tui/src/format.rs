//! Small presentation helpers.

use std::time::SystemTime;

use chrono::{DateTime, Local};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Clock time of a history entry, local timezone.
#[must_use]
pub fn clock_time(timestamp: SystemTime) -> String {
    let local: DateTime<Local> = timestamp.into();
    local.format("%H:%M").to_string()
}

/// Truncate to `max_width` display columns, appending "…" when cut.
#[must_use]
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0usize;
    for c in text.chars() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width > max_width.saturating_sub(1) {
            break;
        }
        width += char_width;
        out.push(c);
    }
    out.push('…');
    out
}
