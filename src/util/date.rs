use chrono::{DateTime, FixedOffset, NaiveDate};

const COMMON_DATE_FORMATS: &[&str] = &[
  "%Y-%m-%dT%H:%M:%S%z",  // ISO timestamp with compact offset ("+0000")
  "%Y-%m-%d %H:%M:%S %z", // Common format with timezone
  "%Y-%m-%d %H:%M:%S",    // Common format without timezone
];

pub fn parse_date(date_str: impl AsRef<str>) -> Option<DateTime<FixedOffset>> {
  let date_str = date_str.as_ref();
  if date_str.trim().is_empty() {
    return None;
  }

  if let Ok(parsed) = DateTime::parse_from_rfc3339(date_str) {
    return Some(parsed);
  }

  if let Ok(parsed) = DateTime::parse_from_rfc2822(date_str) {
    return Some(parsed);
  }

  for fmt in COMMON_DATE_FORMATS {
    if let Ok(parsed) = DateTime::parse_from_str(date_str, fmt) {
      return Some(parsed);
    }
  }

  if let Ok(parsed) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
    let midnight = parsed.and_hms_opt(0, 0, 0)?;
    return Some(midnight.and_utc().fixed_offset());
  }

  None
}

pub fn format_display(date: &DateTime<FixedOffset>) -> String {
  date.format("%d %b %Y").to_string()
}
