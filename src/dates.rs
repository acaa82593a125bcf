use once_cell::sync::Lazy;
use regex::Regex;

static STAMP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{8}-\d{4}").expect("stamp pattern is a valid regex"));

/// Pulls a `YYYYMMDD-HHMM` stamp out of a file name and renders it as `YYYY-MM-DD HH:MM`.
///
/// The digits are sliced positionally, not validated as a calendar date. If a slice is
/// missing the matched token is returned verbatim.
pub fn extract_nested_file_date(file_name: &str) -> Option<String> {
    let token = STAMP_RE.find(file_name)?.as_str();
    Some(format_stamp(token).unwrap_or_else(|| token.to_string()))
}

fn format_stamp(token: &str) -> Option<String> {
    let year = token.get(0..4)?;
    let month = token.get(4..6)?;
    let day = token.get(6..8)?;
    let hour = token.get(9..11)?;
    let minute = token.get(11..13)?;
    Some(format!("{year}-{month}-{day} {hour}:{minute}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_stamp_in_file_name() {
        assert_eq!(
            extract_nested_file_date("load-20240115-0930-init.yaml").as_deref(),
            Some("2024-01-15 09:30")
        );
        assert_eq!(
            extract_nested_file_date("20231231-2359.yml").as_deref(),
            Some("2023-12-31 23:59")
        );
    }

    #[test]
    fn absent_without_stamp() {
        assert_eq!(extract_nested_file_date("schema.yaml"), None);
        assert_eq!(extract_nested_file_date("v1-2024011-0930.yaml"), None);
    }

    #[test]
    fn stamp_is_sliced_without_calendar_checks() {
        assert_eq!(
            extract_nested_file_date("x-20241345-9999.yaml").as_deref(),
            Some("2024-13-45 99:99")
        );
        assert_eq!(
            extract_nested_file_date("x-20230229-1200.yaml").as_deref(),
            Some("2023-02-29 12:00")
        );
    }

    #[test]
    fn short_token_falls_back_to_raw() {
        assert_eq!(format_stamp("2024011"), None);
    }

    #[test]
    fn first_stamp_wins() {
        assert_eq!(
            extract_nested_file_date("20240101-0000_then_20250202-1111.yaml").as_deref(),
            Some("2024-01-01 00:00")
        );
    }
}
