//! Dotted operating system version.

use std::cmp::Ordering;
use std::fmt;

/// An OS version such as `17.4.1`, compared segment by segment as numbers.
///
/// `10.9 < 10.10`, and missing trailing segments count as zero so `17` and
/// `17.0` are equal. Non-numeric text in a segment is ignored after its leading
/// digits; a segment without digits reads as zero.
#[derive(Debug, Clone)]
pub struct OsVersion {
    raw: String,
    segments: Vec<u64>,
}

impl OsVersion {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into().trim().to_string();
        let mut segments: Vec<u64> = raw.split('.').map(parse_segment).collect();
        while segments.last() == Some(&0) {
            segments.pop();
        }
        Self { raw, segments }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn parse_segment(segment: &str) -> u64 {
    let digits: String = segment
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

impl PartialEq for OsVersion {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for OsVersion {}

impl PartialOrd for OsVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OsVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments.cmp(&other.segments)
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for OsVersion {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for OsVersion {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("10.9", "10.10", Ordering::Less ; "numeric_not_lexicographic")]
    #[test_case("10.10", "10.10", Ordering::Equal ; "equal")]
    #[test_case("17", "17.0", Ordering::Equal ; "trailing_zero")]
    #[test_case("17.0.1", "17", Ordering::Greater ; "longer_patch")]
    #[test_case("9.3", "10.0", Ordering::Less ; "major_wins")]
    #[test_case("16.4b2", "16.4", Ordering::Equal ; "suffix_ignored")]
    fn test_compare(left: &str, right: &str, expected: Ordering) {
        assert_eq!(OsVersion::new(left).cmp(&OsVersion::new(right)), expected);
    }

    #[test]
    fn test_display_keeps_raw_text() {
        assert_eq!(OsVersion::new(" 17.0 ").to_string(), "17.0");
    }
}
