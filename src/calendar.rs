use umya_spreadsheet::{HorizontalAlignmentValues, Spreadsheet, VerticalAlignmentValues, Worksheet};

use crate::error::{Error, Result};
use crate::group::Groups;
use crate::timetable::models::{CourseInfo, InstructorInfo};

pub mod layout;

use layout::{GridLayout, Placement};

/// Draws one weekly calendar sheet per instructor, cloned from a template sheet
#[derive(Clone, Debug)]
pub struct CalendarRenderer {
    template: String,
    layout: GridLayout,
}

impl CalendarRenderer {
    #[must_use]
    pub fn new(template: impl Into<String>, layout: GridLayout) -> Self {
        Self {
            template: template.into(),
            layout,
        }
    }

    /// Add the sheet of `instructor` to the workbook, returns the blocks drawn.
    ///
    /// Overlapping meetings aren't detected, the last one written wins.
    pub fn render(
        &self,
        book: &mut Spreadsheet,
        instructor: &InstructorInfo,
        courses: &[CourseInfo],
    ) -> Result<Vec<Placement>> {
        // Compute everything first so a bad course doesn't leave half a sheet
        let placements = courses
            .iter()
            .map(|course| self.layout.placements(course))
            .collect::<Result<Vec<_>>>()?
            .concat();

        let mut sheet = book
            .get_sheet_by_name(&self.template)
            .ok_or_else(|| Error::workbook(format!("no {:?} sheet in the workbook", self.template)))?
            .clone();
        sheet.set_name(instructor.name.clone());
        let sheet = book.add_sheet(sheet).map_err(|e| {
            Error::workbook(format!("can't add the sheet of {:?}: {e}", instructor.name))
        })?;

        self.write_header(sheet, instructor);
        for placement in &placements {
            draw(sheet, placement);
        }

        log::info!(
            "Sheet {:?} drawn with {} blocks",
            instructor.name,
            placements.len()
        );

        Ok(placements)
    }

    fn write_header(&self, sheet: &mut Worksheet, instructor: &InstructorInfo) {
        let header = &self.layout.header;
        let fields = [
            (&header.name, instructor.name.clone()),
            (&header.ext, instructor.ext.clone()),
            (&header.office, format!("Office: {}", instructor.office_location)),
            (&header.email, instructor.email.clone()),
        ];

        for (cell, value) in fields {
            sheet.get_cell_mut(cell.as_str()).set_value_string(value);
        }
    }
}

/// Draw the sheet of every instructor, returns the number of sheets added
pub fn render_all(
    book: &mut Spreadsheet,
    renderer: &CalendarRenderer,
    groups: &Groups<String, CourseInfo>,
) -> Result<usize> {
    for (name, courses) in groups.iter() {
        // Office hours only reach a group that already has a scraped course
        let instructor = courses
            .iter()
            .find_map(|course| course.instructor.as_deref())
            .ok_or_else(|| Error::MissingGroupKey(name.clone()))?;

        renderer.render(book, instructor, courses)?;
    }

    Ok(groups.len())
}

fn draw(sheet: &mut Worksheet, placement: &Placement) {
    // Excel rejects merges of a single cell
    if placement.rows() > 1 {
        sheet.add_merge_cells(placement.range());
    }

    let anchor = placement.anchor();
    sheet
        .get_cell_mut(anchor.as_str())
        .set_value_string(placement.label.as_str());

    let style = sheet.get_style_mut(anchor.as_str());
    style.get_font_mut().set_bold(true);
    let alignment = style.get_alignment_mut();
    alignment.set_horizontal(HorizontalAlignmentValues::Center);
    alignment.set_vertical(VerticalAlignmentValues::Center);
    alignment.set_wrap_text(true);
    style.set_background_color(placement.fill);
}
