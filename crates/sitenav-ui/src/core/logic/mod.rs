//! Pure formatting helpers used by row templates, testable outside wasm.

use chrono::{DateTime, Datelike};

/// Longest URL shown verbatim in a row before truncation.
pub const MAX_URL_DISPLAY: usize = 100;

/// Placeholder for absent values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Size in megabytes with two decimals; absent or zero sizes show `N/A`.
#[must_use]
pub fn format_size_mb(size: Option<u64>) -> String {
    const BYTES_PER_MIB: u64 = 1024 * 1024;
    match size {
        Some(bytes) if bytes > 0 => {
            let hundredths = (u128::from(bytes) * 100 + u128::from(BYTES_PER_MIB) / 2)
                / u128::from(BYTES_PER_MIB);
            format!("{}.{:02} MB", hundredths / 100, hundredths % 100)
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Calendar date as `D/M/YYYY` in UTC; absent or malformed input shows `N/A`.
#[must_use]
pub fn format_date(raw: Option<&str>) -> String {
    raw.and_then(|value| DateTime::parse_from_rfc3339(value).ok())
        .map(|parsed| parsed.naive_utc().date())
        .map_or_else(
            || NOT_AVAILABLE.to_string(),
            |date| format!("{}/{}/{}", date.day(), date.month(), date.year()),
        )
}

/// Display form of a URL, cut to [`MAX_URL_DISPLAY`] characters plus `...`.
#[must_use]
pub fn truncate_url(url: &str) -> String {
    match url.char_indices().nth(MAX_URL_DISPLAY) {
        Some((cut, _)) => format!("{}...", &url[..cut]),
        None => url.to_string(),
    }
}

/// Escape text for interpolation into element content or a quoted attribute.
#[must_use]
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Display name of whoever last modified an entity.
#[must_use]
pub fn modifier_label(name: Option<&str>, unknown: &str) -> String {
    name.map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(unknown)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_render_in_megabytes() {
        assert_eq!(format_size_mb(Some(1_048_576)), "1.00 MB");
        assert_eq!(format_size_mb(Some(1_572_864)), "1.50 MB");
        assert_eq!(format_size_mb(Some(5_000)), "0.00 MB");
        assert_eq!(format_size_mb(Some(0)), "N/A");
        assert_eq!(format_size_mb(None), "N/A");
    }

    #[test]
    fn dates_render_day_month_year() {
        assert_eq!(format_date(Some("2024-01-02T00:00:00Z")), "2/1/2024");
        assert_eq!(format_date(Some("2023-12-31T23:30:00-02:00")), "1/1/2024");
        assert_eq!(format_date(Some("not a date")), "N/A");
        assert_eq!(format_date(None), "N/A");
    }

    #[test]
    fn long_urls_are_truncated() {
        let short = "https://x/d1";
        assert_eq!(truncate_url(short), short);
        let long = format!("https://x/{}", "a".repeat(120));
        let shown = truncate_url(&long);
        assert_eq!(shown.len(), MAX_URL_DISPLAY + 3);
        assert!(shown.ends_with("..."));
        let exact = "b".repeat(MAX_URL_DISPLAY);
        assert_eq!(truncate_url(&exact), exact);
    }

    #[test]
    fn markup_characters_are_escaped() {
        assert_eq!(
            escape_html(r#"<b data-id="X">Tom & Jerry's</b>"#),
            "&lt;b data-id=&quot;X&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain.pdf"), "plain.pdf");
    }

    #[test]
    fn missing_modifier_is_unknown() {
        assert_eq!(modifier_label(Some("Ada"), "Unknown"), "Ada");
        assert_eq!(modifier_label(Some("  "), "Unknown"), "Unknown");
        assert_eq!(modifier_label(None, "Unknown"), "Unknown");
    }
}
