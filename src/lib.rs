//! Weekly schedule workbook of every instructor of a department.
//!
//! The schedule listing is scraped, each instructor's page is fetched once
//! for their contact details, office hours come from a local table, and every
//! instructor gets a copy of the template sheet with their meetings drawn in.

pub mod calendar;
pub mod error;
pub mod group;
pub mod info;
pub mod office_hours;
pub mod timetable;
pub mod utils;
pub mod workbook;

#[cfg(test)]
mod tests {
    use scraper::Html;

    use crate::calendar::{self, layout::GridLayout, tests::template_book, CalendarRenderer};
    use crate::group::{by_instructor_name, group_courses_by};
    use crate::info::InstructorCache;
    use crate::office_hours::{merge_office_hours, read_office_hours, UnknownInstructorPolicy};
    use crate::timetable::{self, tests::jane, tests::LISTING, tests::LISTING_URL};

    const OFFICE_HOURS: &str = "name,days,start_time,end_time,location
\"Doe, Jane\",F,1:10 PM,2:00 PM,192-231
";

    #[tokio::test]
    async fn listing_and_office_hours_to_one_sheet() {
        let mut cache = InstructorCache::new();
        cache.insert("https://schedules.calpoly.edu/person_jdoe.htm", jane());

        let rows = timetable::parse_rows(&Html::parse_document(LISTING)).unwrap();
        let client = reqwest::Client::new();
        let courses = timetable::build(&client, &mut cache, LISTING_URL, rows)
            .await
            .unwrap();

        let mut groups = group_courses_by(courses, by_instructor_name).unwrap();
        let entries = read_office_hours(OFFICE_HOURS.as_bytes()).unwrap();
        merge_office_hours(&mut groups, entries, UnknownInstructorPolicy::Abort, |_| {
            unreachable!()
        })
        .unwrap();

        let mut book = template_book();
        let renderer = CalendarRenderer::new("Template", GridLayout::default());
        assert_eq!(calendar::render_all(&mut book, &renderer, &groups).unwrap(), 1);

        let names: Vec<&str> = book
            .get_sheet_collection()
            .iter()
            .map(|sheet| sheet.get_name())
            .collect();
        assert_eq!(names, ["Template", "Doe, Jane"]);

        let sheet = book.get_sheet_by_name("Doe, Jane").unwrap();
        let merged: Vec<String> = sheet
            .get_merge_cells()
            .iter()
            .map(|range| range.get_range())
            .collect();
        assert_eq!(merged, ["B5:B6", "F15:F16"]);
        assert_eq!(sheet.get_value("B5"), "IME 101-01 LEC\n192-0101");
        assert_eq!(sheet.get_value("F15"), "Office Hours \n192-231");
    }
}
