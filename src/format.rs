use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// Human-readable size on a 1024 ladder, one decimal place.
pub fn format_bytes(bytes: f64) -> String {
    const STEP: f64 = 1024.0;
    let mut value = if bytes.is_finite() { bytes } else { 0.0 };
    for unit in ["B", "KB", "MB", "GB", "TB"] {
        if value.abs() < STEP {
            return format!("{value:.1} {unit}");
        }
        value /= STEP;
    }
    format!("{value:.1} PB")
}

pub fn format_rate(bytes_per_sec: f64) -> String {
    format!("{}/s", format_bytes(bytes_per_sec))
}

/// Event rates (context switches, interrupts) with k/M suffixes.
pub fn format_count_rate(per_sec: f64) -> String {
    if per_sec >= 1_000_000.0 {
        format!("{:.1}M/s", per_sec / 1_000_000.0)
    } else if per_sec >= 1_000.0 {
        format!("{:.1}k/s", per_sec / 1_000.0)
    } else {
        format!("{per_sec:.0}/s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_walk_the_ladder() {
        assert_eq!(format_bytes(0.0), "0.0 B");
        assert_eq!(format_bytes(1023.0), "1023.0 B");
        assert_eq!(format_bytes(1024.0), "1.0 KB");
        assert_eq!(format_bytes(1536.0 * 1024.0), "1.5 MB");
        assert_eq!(format_bytes(3.0 * 1024f64.powi(3)), "3.0 GB");
        assert_eq!(format_bytes(2.0 * 1024f64.powi(4)), "2.0 TB");
        assert_eq!(format_bytes(5.0 * 1024f64.powi(5)), "5.0 PB");
        assert_eq!(format_bytes(4096.0 * 1024f64.powi(5)), "4096.0 PB");
    }

    #[test]
    fn rates_get_suffixes() {
        assert_eq!(format_rate(1000.0), "1000.0 B/s");
        assert_eq!(format_count_rate(12.4), "12/s");
        assert_eq!(format_count_rate(12_345.0), "12.3k/s");
        assert_eq!(format_count_rate(2_500_000.0), "2.5M/s");
    }

    #[test]
    fn non_finite_bytes_render_as_zero() {
        assert_eq!(format_bytes(f64::NAN), "0.0 B");
    }

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_unicode("short", 10), "short");
        assert_eq!(truncate_unicode("abcdefgh", 5), "abcd\u{2026}");
    }
}
