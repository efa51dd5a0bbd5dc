//! Date/time layouts accepted for configuration values
//!
//! Layouts are tried in table order and must match the whole input exactly.
//! The offset-bearing layouts append a literal `Z` followed by a signed
//! offset in one of three widths.

use super::{FromConfig, Strategy};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeZone};

/// Longest offset accepted, in hours
const MAX_OFFSET_HOURS: i32 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimePart {
    None,
    Minutes,
    Seconds,
    Millis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OffsetPart {
    None,
    /// `±hh:mm`
    HoursMinutes,
    /// `±hh`
    Hours,
    /// `±h`
    Hour,
}

/// One accepted textual layout
#[derive(Debug, Clone, Copy)]
pub struct DateLayout {
    pub pattern: &'static str,
    time: TimePart,
    offset: OffsetPart,
}

impl DateLayout {
    const fn new(pattern: &'static str, time: TimePart, offset: OffsetPart) -> Self {
        Self {
            pattern,
            time,
            offset,
        }
    }

    pub fn has_offset(&self) -> bool {
        self.offset != OffsetPart::None
    }

    fn parse(&self, raw: &str) -> Option<ParsedDateTime> {
        let (body, offset) = match self.offset {
            OffsetPart::None => (raw, None),
            width => {
                let (body, suffix) = raw.rsplit_once('Z')?;
                (body, Some(parse_offset(suffix, width)?))
            }
        };

        Some(ParsedDateTime {
            naive: parse_body(body, self.time)?,
            offset,
        })
    }
}

/// Accepted layouts, in the order they are tried
pub const DATE_LAYOUTS: [DateLayout; 16] = [
    DateLayout::new("YYYY-MM-DD", TimePart::None, OffsetPart::None),
    DateLayout::new("YYYY-MM-DDThh:mm", TimePart::Minutes, OffsetPart::None),
    DateLayout::new("YYYY-MM-DDThh:mm:ss", TimePart::Seconds, OffsetPart::None),
    DateLayout::new("YYYY-MM-DDThh:mm:ss.fff", TimePart::Millis, OffsetPart::None),
    DateLayout::new("YYYY-MM-DDZ±hh:mm", TimePart::None, OffsetPart::HoursMinutes),
    DateLayout::new("YYYY-MM-DDThh:mmZ±hh:mm", TimePart::Minutes, OffsetPart::HoursMinutes),
    DateLayout::new("YYYY-MM-DDThh:mm:ssZ±hh:mm", TimePart::Seconds, OffsetPart::HoursMinutes),
    DateLayout::new("YYYY-MM-DDThh:mm:ss.fffZ±hh:mm", TimePart::Millis, OffsetPart::HoursMinutes),
    DateLayout::new("YYYY-MM-DDZ±hh", TimePart::None, OffsetPart::Hours),
    DateLayout::new("YYYY-MM-DDThh:mmZ±hh", TimePart::Minutes, OffsetPart::Hours),
    DateLayout::new("YYYY-MM-DDThh:mm:ssZ±hh", TimePart::Seconds, OffsetPart::Hours),
    DateLayout::new("YYYY-MM-DDThh:mm:ss.fffZ±hh", TimePart::Millis, OffsetPart::Hours),
    DateLayout::new("YYYY-MM-DDZ±h", TimePart::None, OffsetPart::Hour),
    DateLayout::new("YYYY-MM-DDThh:mmZ±h", TimePart::Minutes, OffsetPart::Hour),
    DateLayout::new("YYYY-MM-DDThh:mm:ssZ±h", TimePart::Seconds, OffsetPart::Hour),
    DateLayout::new("YYYY-MM-DDThh:mm:ss.fffZ±h", TimePart::Millis, OffsetPart::Hour),
];

/// Date/time text matched against one of [`DATE_LAYOUTS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDateTime {
    pub naive: NaiveDateTime,
    pub offset: Option<FixedOffset>,
}

impl ParsedDateTime {
    /// Wall-clock time in the local zone; explicit offsets are converted
    pub fn to_local_naive(&self) -> Option<NaiveDateTime> {
        match self.offset {
            Some(offset) => offset
                .from_local_datetime(&self.naive)
                .single()
                .map(|dt| dt.with_timezone(&Local).naive_local()),
            None => Some(self.naive),
        }
    }

    /// Offset-bearing time; text without an offset is read as local time
    pub fn to_fixed_offset(&self) -> Option<DateTime<FixedOffset>> {
        match self.offset {
            Some(offset) => offset.from_local_datetime(&self.naive).single(),
            None => Local
                .from_local_datetime(&self.naive)
                .earliest()
                .map(|dt| dt.with_timezone(&dt.offset().fix())),
        }
    }
}

/// Match `raw` against the accepted layouts, first hit wins
pub fn parse(raw: &str) -> Option<ParsedDateTime> {
    DATE_LAYOUTS.iter().find_map(|layout| layout.parse(raw))
}

pub(crate) fn no_layout_reason() -> String {
    let patterns: Vec<&str> = DATE_LAYOUTS.iter().map(|layout| layout.pattern).collect();
    format!("expected one of the layouts {}", patterns.join(", "))
}

/// Check `text` against a shape where `d` stands for an ASCII digit
fn matches_shape(text: &str, shape: &str) -> bool {
    text.len() == shape.len()
        && text
            .bytes()
            .zip(shape.bytes())
            .all(|(t, s)| if s == b'd' { t.is_ascii_digit() } else { t == s })
}

fn parse_body(body: &str, time: TimePart) -> Option<NaiveDateTime> {
    let (shape, format) = match time {
        TimePart::None => ("dddd-dd-dd", "%Y-%m-%d"),
        TimePart::Minutes => ("dddd-dd-ddTdd:dd", "%Y-%m-%dT%H:%M"),
        TimePart::Seconds => ("dddd-dd-ddTdd:dd:dd", "%Y-%m-%dT%H:%M:%S"),
        TimePart::Millis => ("dddd-dd-ddTdd:dd:dd.ddd", "%Y-%m-%dT%H:%M:%S%.f"),
    };
    if !matches_shape(body, shape) {
        return None;
    }

    match time {
        TimePart::None => NaiveDate::parse_from_str(body, format)
            .ok()?
            .and_hms_opt(0, 0, 0),
        _ => NaiveDateTime::parse_from_str(body, format).ok(),
    }
}

fn parse_offset(suffix: &str, width: OffsetPart) -> Option<FixedOffset> {
    let sign = match suffix.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let digits = &suffix[1..];

    let (hours, minutes) = match width {
        OffsetPart::HoursMinutes if matches_shape(digits, "dd:dd") => {
            (digits[..2].parse::<i32>().ok()?, digits[3..].parse::<i32>().ok()?)
        }
        OffsetPart::Hours if matches_shape(digits, "dd") => (digits.parse::<i32>().ok()?, 0),
        OffsetPart::Hour if matches_shape(digits, "d") => (digits.parse::<i32>().ok()?, 0),
        _ => return None,
    };
    if hours > MAX_OFFSET_HOURS || minutes >= 60 || (hours == MAX_OFFSET_HOURS && minutes > 0) {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

impl FromConfig for NaiveDateTime {
    fn strategy() -> Strategy<Self> {
        Strategy::LocalDateTime(Some)
    }
}

/// Explicit offsets keep their instant; offset-less text is read as local time
impl FromConfig for DateTime<Local> {
    fn strategy() -> Strategy<Self> {
        Strategy::OffsetDateTime(|dt| dt.with_timezone(&Local))
    }
}

impl FromConfig for DateTime<FixedOffset> {
    fn strategy() -> Strategy<Self> {
        Strategy::OffsetDateTime(|dt| dt)
    }
}
