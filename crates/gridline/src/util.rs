//! Unicode-aware text measurement and padding for the text sink.
//!
//! Widths are display columns: CJK characters count as two, combining marks
//! as zero.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of `s` in terminal columns.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut `s` to at most `max_width` columns, ending with `marker` when cut.
pub fn truncate_end(s: &str, max_width: usize, marker: &str) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let marker_width = display_width(marker);
    if max_width <= marker_width {
        return marker.chars().take(max_width).collect();
    }

    let budget = max_width - marker_width;
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(marker);
    out
}

/// Pad `s` with spaces on the right to `width` columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(pad))
}

/// Center `s` within `width` columns; odd padding goes to the right.
pub fn pad_center(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(s));
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(pad - left))
}
