use std::{collections::HashMap, sync::OnceLock};

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result};
use crate::info::InstructorCache;
use crate::utils::{get_webpage, select_one, selector, text_of, NBSP};

pub mod models;

use models::{CourseInfo, ScheduleRow, Time, Weekday};

/// Classes of the cells read from every row
const ROW_CELLS: [&str; 8] = [
    "courseName",
    "courseSection",
    "courseType",
    "courseDays",
    "endTime",
    "personName",
    "location",
    "startTime",
];

/// Fetch the schedule listing and build every scheduled course of it
pub async fn courses(
    client: &reqwest::Client,
    cache: &mut InstructorCache,
    url: &str,
) -> Result<Vec<CourseInfo>> {
    log::info!("Fetching schedule listing {url}");
    let document = get_webpage(client, url).await?;
    let rows = parse_rows(&document)?;
    log::info!("{} scheduled rows found", rows.len());

    build(client, cache, url, rows).await
}

/// Turn the rows into courses, resolving instructors through the cache
pub async fn build(
    client: &reqwest::Client,
    cache: &mut InstructorCache,
    base_url: &str,
    rows: Vec<ScheduleRow>,
) -> Result<Vec<CourseInfo>> {
    let base = Url::parse(base_url)
        .map_err(|e| Error::html_parse(format!("invalid schedule url {base_url}: {e}")))?;

    let mut courses = Vec::with_capacity(rows.len());
    for row in rows {
        let instructor_url = base.join(&row.instructor_href).map_err(|e| {
            Error::html_parse(format!(
                "invalid instructor link {:?}: {e}",
                row.instructor_href
            ))
        })?;
        let instructor = cache
            .get_or_fetch(client, &row.instructor_name, instructor_url.as_str())
            .await?;

        courses.push(CourseInfo {
            name_and_section: format!("{}-{}", row.course_name, row.section),
            ty: row.ty,
            days: Weekday::parse_days(&row.days)?,
            start_time: Time::parse(&row.start_time)?,
            end_time: Time::parse(&row.end_time)?,
            instructor: Some(instructor),
            location: row.location,
        });
    }

    Ok(courses)
}

/// Read the rows of the schedule table.
///
/// The first row holds the headers. Rows whose start time or instructor
/// is a lone non-breaking space aren't on the calendar and are skipped.
pub fn parse_rows(document: &Html) -> Result<Vec<ScheduleRow>> {
    let sel_tr = selector("tr");
    let cells = cell_selectors();

    let mut rows = vec![];
    for tr in document.select(&sel_tr).skip(1) {
        let start_time = text_of(select_one(tr, &cells["startTime"], "startTime cell")?);
        let person = text_of(select_one(tr, &cells["personName"], "personName cell")?);

        if start_time == NBSP || person == NBSP {
            log::debug!("Skipping unscheduled row: {}", text_of(tr).trim());
            continue;
        }

        rows.push(parse_row(tr, start_time)?);
    }

    Ok(rows)
}

/// `td.{class}` selector of every cell read, built once
fn cell_selectors() -> &'static HashMap<&'static str, Selector> {
    static CELLS: OnceLock<HashMap<&'static str, Selector>> = OnceLock::new();
    CELLS.get_or_init(|| {
        ROW_CELLS
            .iter()
            .map(|&class| (class, selector(&format!("td.{class}"))))
            .collect()
    })
}

fn parse_row(tr: ElementRef, start_time: String) -> Result<ScheduleRow> {
    let cells = cell_selectors();
    let sel_a = selector("a");

    let cell = |class: &str| select_one(tr, &cells[class], class);
    let anchor = |class: &str| select_one(cell(class)?, &sel_a, &format!("link in {class} cell"));

    let person = anchor("personName")?;
    let attr = |name: &str| {
        person
            .value()
            .attr(name)
            .map(str::to_owned)
            .ok_or_else(|| Error::html_parse(format!("instructor link without {name}")))
    };

    Ok(ScheduleRow {
        course_name: text_of(anchor("courseName")?),
        section: text_of(cell("courseSection")?),
        ty: text_of(cell("courseType")?),
        days: text_of(cell("courseDays")?),
        start_time,
        end_time: text_of(cell("endTime")?),
        instructor_name: attr("title")?,
        instructor_href: attr("href")?,
        location: text_of(anchor("location")?),
    })
}
