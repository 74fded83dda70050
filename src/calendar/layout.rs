use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::timetable::models::{CourseInfo, Time, Weekday};

/// Background of office hours blocks
pub const OFFICE_HOURS_FILL: &str = "FFFFFF00";
/// Background of regular courses
pub const COURSE_FILL: &str = "FFC6E0B4";

/// Cells of the template receiving the instructor details
#[derive(Clone, Debug)]
pub struct HeaderCells {
    pub name: String,
    pub ext: String,
    pub office: String,
    pub email: String,
}

impl Default for HeaderCells {
    fn default() -> Self {
        Self {
            name: "B1".into(),
            ext: "D1".into(),
            office: "E1".into(),
            email: "G1".into(),
        }
    }
}

/// Geometry of the weekly grid drawn in the template sheet.
///
/// Has to match the template: changing its rows means changing these values.
#[derive(Clone, Debug)]
pub struct GridLayout {
    /// Hour of the first grid row
    pub origin_hour: u32,
    /// Row of `origin_hour:00`, rows above it are headers
    pub first_row: u32,
    pub rows_per_hour: u32,
    /// Minute starting the second row of each hour
    pub sub_slot_minute: u32,
    pub columns: HashMap<Weekday, String>,
    pub header: HeaderCells,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            origin_hour: 7,
            first_row: 3,
            rows_per_hour: 2,
            sub_slot_minute: 40,
            columns: HashMap::from([
                (Weekday::M, "B".into()),
                (Weekday::T, "C".into()),
                (Weekday::W, "D".into()),
                (Weekday::R, "E".into()),
                (Weekday::F, "F".into()),
            ]),
            header: HeaderCells::default(),
        }
    }
}

/// A block of cells holding one meeting on one day
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub column: String,
    pub start_row: u32,
    /// Inclusive
    pub end_row: u32,
    pub label: String,
    pub fill: &'static str,
}

impl Placement {
    /// Top cell, holding the label and the style
    pub fn anchor(&self) -> String {
        format!("{}{}", self.column, self.start_row)
    }

    /// Range to merge, i.e. `B5:B6`
    pub fn range(&self) -> String {
        format!("{}:{}{}", self.anchor(), self.column, self.end_row)
    }

    pub fn rows(&self) -> u32 {
        self.end_row - self.start_row + 1
    }
}

impl GridLayout {
    /// Row where a meeting starting at `time` begins.
    ///
    /// Only the sub-slot minute moves to the second row of the hour,
    /// every other minute is kept on the hour's first row.
    pub fn row_of(&self, time: Time) -> Result<u32> {
        if time.hour < self.origin_hour {
            return Err(Error::OffGrid(time.to_string()));
        }

        let mut row = (time.hour - self.origin_hour) * self.rows_per_hour + self.first_row;
        if time.minute == self.sub_slot_minute {
            row += 1;
        }

        Ok(row)
    }

    pub fn column_of(&self, day: Weekday) -> Result<&str> {
        self.columns
            .get(&day)
            .map(String::as_str)
            .ok_or_else(|| Error::workbook(format!("no column configured for {day:?}")))
    }

    /// Cells taken by the course, one block per day.
    ///
    /// The end row is the row of the end time minus one. Blocks whose last
    /// row is less than three rows below the first one, and office hours,
    /// get the label on two lines.
    pub fn placements(&self, course: &CourseInfo) -> Result<Vec<Placement>> {
        let start_row = self.row_of(course.start_time)?;
        let end_row = self
            .row_of(course.end_time)?
            .checked_sub(1)
            .filter(|&end| end >= start_row)
            .ok_or_else(|| Error::EmptySlot(course.name_and_section.clone()))?;

        let office_hours = course.is_office_hours();
        let label = if end_row - start_row < 3 || office_hours {
            format!(
                "{} {}\n{}",
                course.name_and_section, course.ty, course.location
            )
        } else {
            format!(
                "{}\n{}\n{}",
                course.name_and_section, course.ty, course.location
            )
        };
        let fill = if office_hours {
            OFFICE_HOURS_FILL
        } else {
            COURSE_FILL
        };

        course
            .days
            .iter()
            .map(|&day| {
                Ok(Placement {
                    column: self.column_of(day)?.to_owned(),
                    start_row,
                    end_row,
                    label: label.clone(),
                    fill,
                })
            })
            .collect()
    }
}

/// Row of `time` in the default template
pub fn time_to_row(time: Time) -> Result<u32> {
    GridLayout::default().row_of(time)
}
