use std::{fs::File, io::Read, path::Path};

use clap::ValueEnum;
use dialoguer::Confirm;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::group::Groups;
use crate::timetable::models::{CourseInfo, Time, Weekday, OFFICE_HOURS};

/// What to do with an office hours row naming nobody we scraped
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum UnknownInstructorPolicy {
    /// Stop the run
    #[default]
    Abort,
    /// Warn and drop the row
    Skip,
    /// Ask whether to drop the row or stop
    Ask,
}

/// One line of the office hours table
#[derive(Debug, Deserialize)]
struct Record {
    name: String,
    days: String,
    start_time: String,
    end_time: String,
    location: String,
}

/// Office hours block of an instructor, matched by display name
#[derive(Debug)]
pub struct OfficeHours {
    pub instructor_name: String,
    pub course: CourseInfo,
}

/// Read the office hours table. The first line is a header, columns are
/// `name, days, start_time, end_time, location` in that order.
pub fn read_office_hours(reader: impl Read) -> Result<Vec<OfficeHours>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = vec![];
    // Columns are positional, the header names don't matter
    for record in csv.records() {
        let record: Record = record?.deserialize(None)?;
        entries.push(OfficeHours {
            course: CourseInfo {
                name_and_section: OFFICE_HOURS.to_owned(),
                ty: String::new(),
                days: Weekday::parse_days(&record.days)?,
                start_time: Time::parse(&record.start_time)?,
                end_time: Time::parse(&record.end_time)?,
                instructor: None,
                location: record.location,
            },
            instructor_name: record.name,
        });
    }

    Ok(entries)
}

pub fn read_office_hours_file(path: &Path) -> Result<Vec<OfficeHours>> {
    read_office_hours(File::open(path)?)
}

/// Ask on the terminal whether the office hours of `name` may be dropped
pub fn confirm_skip(name: &str) -> Result<bool> {
    let skip = Confirm::new()
        .with_prompt(format!(
            "{name:?} isn't in the schedule, skip their office hours?"
        ))
        .default(true)
        .interact()?;

    Ok(skip)
}

/// Append the office hours to the group of their instructor.
///
/// `confirm` is only called under [`UnknownInstructorPolicy::Ask`], it
/// returns whether the row may be dropped. Returns the number of merged rows.
pub fn merge_office_hours(
    groups: &mut Groups<String, CourseInfo>,
    entries: Vec<OfficeHours>,
    policy: UnknownInstructorPolicy,
    mut confirm: impl FnMut(&str) -> Result<bool>,
) -> Result<usize> {
    let mut merged = 0;
    for entry in entries {
        if let Some(courses) = groups.get_mut(entry.instructor_name.as_str()) {
            courses.push(entry.course);
            merged += 1;
            continue;
        }

        let skip = match policy {
            UnknownInstructorPolicy::Abort => false,
            UnknownInstructorPolicy::Skip => true,
            UnknownInstructorPolicy::Ask => confirm(&entry.instructor_name)?,
        };
        if !skip {
            return Err(Error::UnknownInstructor(entry.instructor_name));
        }
        log::warn!(
            "Skipping office hours of {:?}, no such instructor in the schedule",
            entry.instructor_name
        );
    }

    Ok(merged)
}
