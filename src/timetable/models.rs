use std::{fmt, str::FromStr, sync::Arc, sync::OnceLock};

use regex::Regex;

use crate::error::{Error, Result};

/// Label used as `name_and_section` for every office hours block
pub const OFFICE_HOURS: &str = "Office Hours";

/// Time of day, 24-hour clock
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    pub hour: u32,
    pub minute: u32,
}

impl Time {
    #[must_use]
    pub const fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    /// Parse a `H:MM AM|PM` string.
    ///
    /// `12:xx PM` stays at hour 12, other PM hours get 12 added.
    /// `12:xx AM` is rejected, nothing is scheduled at midnight.
    pub fn parse(text: &str) -> Result<Self> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"(?i)^\s*(?P<h>\d{1,2}):(?P<m>\d{2})\s*(?P<meridiem>AM|PM)\s*$")
                .expect("time regex should be valid")
        });

        let invalid = || Error::Time(text.to_owned());
        let captures = re.captures(text).ok_or_else(invalid)?;

        let hour: u32 = captures["h"].parse().map_err(|_| invalid())?;
        let minute: u32 = captures["m"].parse().map_err(|_| invalid())?;
        let pm = captures["meridiem"].eq_ignore_ascii_case("PM");

        if !(1..=12).contains(&hour) || minute > 59 || (hour == 12 && !pm) {
            return Err(invalid());
        }

        let hour = if pm && hour != 12 { hour + 12 } else { hour };

        Ok(Self { hour, minute })
    }
}

impl FromStr for Time {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, meridiem) = match self.hour {
            12 => (12, "PM"),
            h if h > 12 => (h - 12, "PM"),
            h => (h, "AM"),
        };
        write!(f, "{hour}:{:02} {meridiem}", self.minute)
    }
}

/// Day of the week as written by the schedule website
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Weekday {
    /// Monday
    M,
    /// Tuesday
    T,
    /// Wednesday
    W,
    /// Thursday
    R,
    /// Friday
    F,
}

impl Weekday {
    pub fn from_code(code: char) -> Result<Self> {
        match code {
            'M' => Ok(Self::M),
            'T' => Ok(Self::T),
            'W' => Ok(Self::W),
            'R' => Ok(Self::R),
            'F' => Ok(Self::F),
            c => Err(Error::Weekday(c)),
        }
    }

    /// Split a string like `"MWF"` into its days, whitespace is ignored
    pub fn parse_days(days: &str) -> Result<Vec<Self>> {
        days.chars()
            .filter(|c| !c.is_whitespace())
            .map(Self::from_code)
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstructorInfo {
    /// Display name, used as the sheet title
    pub name: String,

    /// Phone extension, i.e. `x6-1234`
    pub ext: String,

    pub email: String,

    pub office_location: String,
}

#[derive(Clone, Debug)]
pub struct CourseInfo {
    /// Course name and section, i.e. `IME101-01`, or [`OFFICE_HOURS`]
    pub name_and_section: String,

    /// Type of the meeting (lecture, lab...)
    pub ty: String,

    pub days: Vec<Weekday>,

    pub start_time: Time,

    pub end_time: Time,

    /// Shared with every other course of the same instructor.
    /// Office hours don't carry one, they're attached by name.
    pub instructor: Option<Arc<InstructorInfo>>,

    pub location: String,
}

impl CourseInfo {
    pub fn is_office_hours(&self) -> bool {
        self.name_and_section == OFFICE_HOURS
    }

    pub fn instructor_name(&self) -> Option<&str> {
        self.instructor.as_deref().map(|i| i.name.as_str())
    }
}

/// One row of the schedule listing, before the instructor page is fetched
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleRow {
    pub course_name: String,
    pub section: String,
    pub ty: String,
    pub days: String,
    pub start_time: String,
    pub end_time: String,
    pub instructor_name: String,
    /// Link to the instructor page, relative to the listing
    pub instructor_href: String,
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_morning_and_afternoon() {
        assert_eq!(Time::parse("10:10 AM").unwrap(), Time::new(10, 10));
        assert_eq!(Time::parse("1:40 PM").unwrap(), Time::new(13, 40));
        assert_eq!(Time::parse("12:10 PM").unwrap(), Time::new(12, 10));
        assert_eq!(Time::parse(" 7:00 am ").unwrap(), Time::new(7, 0));
    }

    #[test]
    fn parse_rejects_malformed() {
        for text in ["", "10:10", "10 AM", "13:00 PM", "0:10 AM", "9:75 AM", "12:10 AM"] {
            assert!(Time::parse(text).is_err(), "{text:?} should not parse");
        }
    }

    #[test]
    fn display_parses_back_to_itself() {
        for hour in 1..=12 {
            for minute in [0, 10, 40, 59] {
                for meridiem in ["AM", "PM"] {
                    if hour == 12 && meridiem == "AM" {
                        continue;
                    }
                    let time = Time::parse(&format!("{hour}:{minute:02} {meridiem}")).unwrap();
                    assert!((1..=23).contains(&time.hour));
                    assert_eq!(time.to_string().parse::<Time>().unwrap(), time);
                }
            }
        }
    }

    #[test]
    fn weekday_codes() {
        assert_eq!(
            Weekday::parse_days("MTWRF").unwrap(),
            vec![Weekday::M, Weekday::T, Weekday::W, Weekday::R, Weekday::F]
        );
        assert_eq!(Weekday::parse_days(" T R ").unwrap(), vec![Weekday::T, Weekday::R]);
        assert!(matches!(Weekday::parse_days("MS"), Err(Error::Weekday('S'))));
    }
}
