//! Trim timestamps and the parsing rules for the hh:mm:ss entry fields.

use thiserror::Error;

/// Which end of the trim range a field edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimePoint {
    Start,
    End,
}

/// Which component of a timestamp a field edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Hour,
    Minute,
    Second,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 3] = [TimeUnit::Hour, TimeUnit::Minute, TimeUnit::Second];

    /// Position inside the (hour, minute, second) triple.
    pub fn index(self) -> usize {
        match self {
            TimeUnit::Hour => 0,
            TimeUnit::Minute => 1,
            TimeUnit::Second => 2,
        }
    }

    fn seconds(self) -> f64 {
        match self {
            TimeUnit::Hour => 3600.0,
            TimeUnit::Minute => 60.0,
            TimeUnit::Second => 1.0,
        }
    }

    /// Placeholder shown in an empty entry.
    pub fn placeholder(self) -> &'static str {
        match self {
            TimeUnit::Hour => "hh",
            TimeUnit::Minute => "mm",
            TimeUnit::Second => "ss",
        }
    }
}

/// One timestamp component as typed by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeValue {
    Whole(u64),
    Fractional(f64),
}

impl Default for TimeValue {
    fn default() -> Self {
        TimeValue::Whole(0)
    }
}

impl TimeValue {
    pub fn as_f64(self) -> f64 {
        match self {
            TimeValue::Whole(v) => v as f64,
            TimeValue::Fractional(v) => v,
        }
    }

    pub fn is_zero(self) -> bool {
        self.as_f64() == 0.0
    }
}

impl std::fmt::Display for TimeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeValue::Whole(v) => write!(f, "{}", v),
            TimeValue::Fractional(v) => write!(f, "{}", v),
        }
    }
}

/// An (hour, minute, second) triple.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timestamp(pub [TimeValue; 3]);

impl Timestamp {
    pub fn get(&self, unit: TimeUnit) -> TimeValue {
        self.0[unit.index()]
    }

    pub fn set(&mut self, unit: TimeUnit, value: TimeValue) {
        self.0[unit.index()] = value;
    }

    pub fn is_default(&self) -> bool {
        self.0.iter().all(|v| v.is_zero())
    }

    /// Total offset in seconds. Components are not range-checked, so
    /// `0:90:00` means ninety minutes.
    pub fn to_seconds(&self) -> f64 {
        TimeUnit::ALL
            .iter()
            .map(|unit| self.get(*unit).as_f64() * unit.seconds())
            .sum()
    }
}

/// Start and end of the trim range.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrimTimestamps {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TrimTimestamps {
    pub fn point(&self, point: TimePoint) -> &Timestamp {
        match point {
            TimePoint::Start => &self.start,
            TimePoint::End => &self.end,
        }
    }

    pub fn point_mut(&mut self, point: TimePoint) -> &mut Timestamp {
        match point {
            TimePoint::Start => &mut self.start,
            TimePoint::End => &mut self.end,
        }
    }

    pub fn get(&self, point: TimePoint, unit: TimeUnit) -> TimeValue {
        self.point(point).get(unit)
    }

    pub fn set(&mut self, point: TimePoint, unit: TimeUnit, value: TimeValue) {
        self.point_mut(point).set(unit, value);
    }

    /// True while neither timestamp has been touched.
    pub fn not_set(&self) -> bool {
        self.start.is_default() && self.end.is_default()
    }

    /// `(start, end)` in seconds when the range is usable.
    pub fn range_seconds(&self) -> Option<(f64, f64)> {
        let start = self.start.to_seconds();
        let end = self.end.to_seconds();
        (end > start).then_some((start, end))
    }
}

/// Format seconds as `HH:MM:SS.mmm` for ffmpeg's `-ss`/`-to`.
pub fn format_ffmpeg_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let secs = (total_ms / 1000) % 60;
    let millis = total_ms % 1000;
    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, millis)
}

/// Result of parsing one entry field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrimEdit {
    /// Write this value into the slot.
    Set(TimeValue),
    /// Not a number; leave the slot alone.
    Ignored,
}

/// Rejected trim input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrimInputError {
    #[error("Value must be a positive number! (got {0})")]
    Negative(String),
}

/// Parse the text of a timestamp entry.
///
/// Empty text is zero, text containing a `.` is fractional, anything else
/// must be a whole number. Text that is not a number is ignored; negative
/// numbers are an error.
pub fn parse_trim_field(text: &str) -> Result<TrimEdit, TrimInputError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(TrimEdit::Set(TimeValue::Whole(0)));
    }

    if text.contains('.') {
        return match text.parse::<f64>() {
            Ok(v) if !v.is_finite() => Ok(TrimEdit::Ignored),
            Ok(v) if v < 0.0 => Err(TrimInputError::Negative(text.to_string())),
            Ok(v) => Ok(TrimEdit::Set(TimeValue::Fractional(v))),
            Err(_) => Ok(TrimEdit::Ignored),
        };
    }

    match text.parse::<i64>() {
        Ok(v) if v < 0 => Err(TrimInputError::Negative(text.to_string())),
        Ok(v) => Ok(TrimEdit::Set(TimeValue::Whole(v as u64))),
        Err(_) => Ok(TrimEdit::Ignored),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_is_zero() {
        assert_eq!(parse_trim_field(""), Ok(TrimEdit::Set(TimeValue::Whole(0))));
        assert_eq!(parse_trim_field("  "), Ok(TrimEdit::Set(TimeValue::Whole(0))));
    }

    #[test]
    fn dotted_field_is_fractional() {
        assert_eq!(
            parse_trim_field("1.5"),
            Ok(TrimEdit::Set(TimeValue::Fractional(1.5)))
        );
    }

    #[test]
    fn plain_field_is_whole() {
        assert_eq!(parse_trim_field("90"), Ok(TrimEdit::Set(TimeValue::Whole(90))));
    }

    #[test]
    fn garbage_is_ignored() {
        assert_eq!(parse_trim_field("abc"), Ok(TrimEdit::Ignored));
        assert_eq!(parse_trim_field("1.2.3"), Ok(TrimEdit::Ignored));
        assert_eq!(parse_trim_field("inf"), Ok(TrimEdit::Ignored));
    }

    #[test]
    fn negative_is_rejected() {
        assert!(matches!(
            parse_trim_field("-3"),
            Err(TrimInputError::Negative(_))
        ));
        assert!(matches!(
            parse_trim_field("-0.5"),
            Err(TrimInputError::Negative(_))
        ));
    }

    #[test]
    fn not_set_until_a_field_changes() {
        let mut trim = TrimTimestamps::default();
        assert!(trim.not_set());
        trim.set(TimePoint::End, TimeUnit::Second, TimeValue::Whole(30));
        assert!(!trim.not_set());
    }

    #[test]
    fn seconds_add_up_across_units() {
        let mut ts = Timestamp::default();
        ts.set(TimeUnit::Hour, TimeValue::Whole(1));
        ts.set(TimeUnit::Minute, TimeValue::Whole(2));
        ts.set(TimeUnit::Second, TimeValue::Fractional(3.5));
        assert_eq!(ts.to_seconds(), 3723.5);
    }

    #[test]
    fn range_requires_end_after_start() {
        let mut trim = TrimTimestamps::default();
        trim.set(TimePoint::Start, TimeUnit::Second, TimeValue::Whole(10));
        assert_eq!(trim.range_seconds(), None);
        trim.set(TimePoint::End, TimeUnit::Minute, TimeValue::Whole(1));
        assert_eq!(trim.range_seconds(), Some((10.0, 60.0)));
    }

    #[test]
    fn ffmpeg_timestamp_format() {
        assert_eq!(format_ffmpeg_timestamp(0.0), "00:00:00.000");
        assert_eq!(format_ffmpeg_timestamp(5400.25), "01:30:00.250");
    }
}
