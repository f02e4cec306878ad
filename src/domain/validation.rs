use std::ops::RangeInclusive;

/// Accepted ages, in years.
pub const AGE: RangeInclusive<i32> = 16..=99;
/// Accepted grade point averages.
pub const GPA: RangeInclusive<f32> = 0.0..=10.0;
/// Accepted attendance percentages.
pub const ATTENDANCE: RangeInclusive<f32> = 0.0..=100.0;
/// Accepted years of study.
pub const YEAR_OF_STUDY: RangeInclusive<i32> = 1..=4;

/// Maximum name length in bytes.
pub const NAME_MAX: usize = 49;
/// Maximum course length in bytes.
pub const COURSE_MAX: usize = 29;
/// Maximum subjects length in bytes.
pub const SUBJECTS_MAX: usize = 99;

/// Returns `true` if `age` is within [`AGE`].
#[must_use]
pub fn is_valid_age(age: i32) -> bool {
    AGE.contains(&age)
}

/// Returns `true` if `gpa` is within [`GPA`]. NaN is never valid.
#[must_use]
pub fn is_valid_gpa(gpa: f32) -> bool {
    GPA.contains(&gpa)
}

/// Returns `true` if `attendance` is within [`ATTENDANCE`]. NaN is never
/// valid.
#[must_use]
pub fn is_valid_attendance(attendance: f32) -> bool {
    ATTENDANCE.contains(&attendance)
}

/// Returns `true` if `year` is within [`YEAR_OF_STUDY`].
#[must_use]
pub fn is_valid_year_of_study(year: i32) -> bool {
    YEAR_OF_STUDY.contains(&year)
}

/// Bounds free text to what fits in a fixed-width field.
///
/// The text is cut at the first NUL, then truncated to at most `max_bytes`
/// bytes without splitting a character.
#[must_use]
pub fn bound_text(text: &str, max_bytes: usize) -> String {
    let text = text.split('\0').next().unwrap_or_default();
    if text.len() <= max_bytes {
        return text.to_string();
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(15, false; "below")]
    #[test_case(16, true; "lower bound")]
    #[test_case(99, true; "upper bound")]
    #[test_case(100, false; "above")]
    fn age_range(age: i32, expected: bool) {
        assert_eq!(is_valid_age(age), expected);
    }

    #[test_case(-0.01, false; "negative")]
    #[test_case(0.0, true; "zero")]
    #[test_case(10.0, true; "ten")]
    #[test_case(10.01, false; "above ten")]
    #[test_case(f32::NAN, false; "nan")]
    fn gpa_range(gpa: f32, expected: bool) {
        assert_eq!(is_valid_gpa(gpa), expected);
    }

    #[test_case(0.0, true; "zero")]
    #[test_case(100.0, true; "hundred")]
    #[test_case(100.5, false; "above")]
    #[test_case(f32::INFINITY, false; "infinite")]
    fn attendance_range(attendance: f32, expected: bool) {
        assert_eq!(is_valid_attendance(attendance), expected);
    }

    #[test_case(0, false; "zero")]
    #[test_case(1, true; "first")]
    #[test_case(4, true; "fourth")]
    #[test_case(5, false; "fifth")]
    fn year_range(year: i32, expected: bool) {
        assert_eq!(is_valid_year_of_study(year), expected);
    }

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(bound_text("Asha", NAME_MAX), "Asha");
    }

    #[test]
    fn long_text_is_truncated() {
        let long = "x".repeat(120);
        assert_eq!(bound_text(&long, SUBJECTS_MAX).len(), SUBJECTS_MAX);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // 'é' is two bytes, so the 29-byte cut lands inside the 15th one
        let text = "é".repeat(20);
        let bounded = bound_text(&text, COURSE_MAX);
        assert_eq!(bounded, "é".repeat(14));
    }

    #[test]
    fn text_is_cut_at_nul() {
        assert_eq!(bound_text("Math\0junk", SUBJECTS_MAX), "Math");
    }
}
