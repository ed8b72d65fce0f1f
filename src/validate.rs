//! Input validation and sanitization for course fields.
//!
//! Two compiled patterns gate everything: one for the numeric course code
//! (rendered as text) and one for the free-text fields. Validation runs
//! first; fields that pass are then run through an HTML-stripping sanitizer
//! before they are persisted or echoed back. The same functions back both
//! the server handlers and the console client.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::models::Course;

/// Course codes must render as decimal digits only. Zero or more, so the
/// empty string passes the pattern itself; completeness is checked
/// separately by the handlers.
static CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]*$").expect("code pattern"));

/// Free-text fields: a leading word/quote/hyphen/comma/period character,
/// then up to 250 characters excluding the denylisted symbol set.
static DETAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w'\-,.][^_!¡?÷?¿/\\+=$%ˆ&*(){}|~<>;:\[\]]{0,250}$")
        .expect("detail pattern")
});

/// Which field of a submission failed its pattern check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidField {
    #[error("course code")]
    Code,
    #[error("title")]
    Title,
    #[error("dates")]
    Dates,
    #[error("lecturer")]
    Lecturer,
    #[error("description")]
    Description,
}

pub fn code_matches(code: &str) -> bool {
    CODE_PATTERN.is_match(code)
}

pub fn detail_matches(detail: &str) -> bool {
    DETAIL_PATTERN.is_match(detail)
}

/// Strip markup-unsafe content from a field. Never fails; cleaning already
/// clean input returns it unchanged, so the transform is idempotent.
pub fn sanitize(input: &str) -> String {
    ammonia::clean(input)
}

/// Validate every field of `course` against the patterns, then sanitize in
/// place. Empty text fields bypass the pattern check (they are the "keep
/// previous value" sentinel on update). The first failing field aborts with
/// no partial sanitization applied to later fields.
pub fn validate_and_sanitize(course: &mut Course) -> Result<(), InvalidField> {
    let code_text = course.code.to_string();
    if !code_matches(&code_text) {
        return Err(InvalidField::Code);
    }
    course.code = sanitize(&code_text).parse().unwrap_or(course.code);

    if !course.title.is_empty() && !detail_matches(&course.title) {
        return Err(InvalidField::Title);
    }
    course.title = sanitize(&course.title);

    if !course.dates.is_empty() && !detail_matches(&course.dates) {
        return Err(InvalidField::Dates);
    }
    course.dates = sanitize(&course.dates);

    if !course.lecturer.is_empty() && !detail_matches(&course.lecturer) {
        return Err(InvalidField::Lecturer);
    }
    course.lecturer = sanitize(&course.lecturer);

    if !course.description.is_empty() && !detail_matches(&course.description) {
        return Err(InvalidField::Description);
    }
    course.description = sanitize(&course.description);

    Ok(())
}

/// Sanitize every field without pattern checks, for data already in the
/// store that is about to be emitted in a response.
pub fn sanitize_course(course: &mut Course) {
    course.title = sanitize(&course.title);
    course.dates = sanitize(&course.dates);
    course.lecturer = sanitize(&course.lecturer);
    course.description = sanitize(&course.description);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(title: &str, dates: &str, lecturer: &str, description: &str) -> Course {
        Course {
            code: 101,
            title: title.to_string(),
            dates: dates.to_string(),
            lecturer: lecturer.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn code_pattern_accepts_digits() {
        assert!(code_matches("0"));
        assert!(code_matches("101"));
        assert!(code_matches("999999"));
    }

    #[test]
    fn code_pattern_rejects_non_digits() {
        assert!(!code_matches("10a"));
        assert!(!code_matches("-5"));
        assert!(!code_matches("1 2"));
    }

    #[test]
    fn code_pattern_accepts_empty_string() {
        // Zero-or-more digits, so "" matches. Deliberate carry-over from the
        // original pattern; completeness is enforced elsewhere.
        assert!(code_matches(""));
    }

    #[test]
    fn detail_pattern_accepts_ordinary_text() {
        assert!(detail_matches("Algorithms"));
        assert!(detail_matches("Dr. A"));
        assert!(detail_matches("'quoted start"));
        assert!(detail_matches("-leading hyphen"));
        assert!(detail_matches("2024 Spring"));
    }

    #[test]
    fn detail_pattern_rejects_bad_first_character() {
        assert!(!detail_matches("!bang"));
        assert!(!detail_matches("<tag>"));
        assert!(!detail_matches(" leading space"));
    }

    #[test]
    fn detail_pattern_rejects_denylisted_symbols_anywhere() {
        for bad in ["a<b", "a>b", "a&b", "a;b", "a:b", "a[b", "a]b", "a{b}", "a|b", "a=b", "a_b", "a/b"] {
            assert!(!detail_matches(bad), "expected {bad:?} to be rejected");
        }
    }

    #[test]
    fn detail_pattern_enforces_length_bound() {
        let ok = format!("a{}", "b".repeat(250));
        let too_long = format!("a{}", "b".repeat(251));
        assert!(detail_matches(&ok));
        assert!(!detail_matches(&too_long));
    }

    #[test]
    fn sanitize_strips_script_content() {
        let cleaned = sanitize("hello <script>alert(1)</script>world");
        assert!(!cleaned.contains("<script>"));
        assert!(cleaned.contains("hello"));
    }

    #[test]
    fn sanitize_is_idempotent() {
        for input in [
            "plain text",
            "Dr. A",
            "hello <script>alert(1)</script>",
            "<img src=x onerror=alert(1)>",
            "a & b",
            "",
        ] {
            let once = sanitize(input);
            let twice = sanitize(&once);
            assert_eq!(once, twice, "sanitize not idempotent for {input:?}");
        }
    }

    #[test]
    fn validate_passes_clean_course() {
        let mut c = course("Algorithms", "2024", "Dr. A", "Intro");
        assert!(validate_and_sanitize(&mut c).is_ok());
        assert_eq!(c.title, "Algorithms");
        assert_eq!(c.code, 101);
    }

    #[test]
    fn validate_skips_empty_fields() {
        // Empty fields are the "no change" sentinel on update.
        let mut c = course("", "2025", "", "");
        assert!(validate_and_sanitize(&mut c).is_ok());
    }

    #[test]
    fn validate_reports_first_failing_field() {
        let mut c = course("ok", "20<24", "a;b", "fine");
        assert_eq!(validate_and_sanitize(&mut c), Err(InvalidField::Dates));
    }

    #[test]
    fn validate_rejects_negative_code() {
        let mut c = course("ok", "ok", "ok", "ok");
        c.code = -5;
        assert_eq!(validate_and_sanitize(&mut c), Err(InvalidField::Code));
    }
}
