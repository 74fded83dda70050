use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use umya_spreadsheet::Spreadsheet;

use crate::error::{Error, Result};

/// Load the template workbook, making sure the template sheet is there
pub fn load_template(path: &Path, sheet: &str) -> Result<Spreadsheet> {
    log::info!("Loading template {}", path.display());
    let book = umya_spreadsheet::reader::xlsx::read(path)
        .map_err(|e| Error::workbook(format!("can't read {}: {e}", path.display())))?;

    if book.get_sheet_by_name(sheet).is_none() {
        return Err(Error::workbook(format!(
            "{} has no {sheet:?} sheet",
            path.display()
        )));
    }

    Ok(book)
}

/// Name of the workbook written on `date`
pub fn output_filename(date: NaiveDate) -> String {
    format!("Instructor_Schedules_{}.xlsx", date.format("%m-%d-%y"))
}

/// Write the workbook in `dir`, returns the path written
pub fn save(book: &Spreadsheet, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    let path = dir.join(output_filename(date));
    umya_spreadsheet::writer::xlsx::write(book, &path)
        .map_err(|e| Error::workbook(format!("can't write {}: {e}", path.display())))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::tests::template_book;

    #[test]
    fn dated_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(output_filename(date), "Instructor_Schedules_03-07-24.xlsx");
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 11, 25).unwrap();

        let path = save(&template_book(), dir.path(), date).unwrap();
        assert_eq!(path, dir.path().join("Instructor_Schedules_11-25-24.xlsx"));

        assert!(load_template(&path, "Template").is_ok());
        assert!(matches!(
            load_template(&path, "Other"),
            Err(Error::Workbook(_))
        ));
    }

    #[test]
    fn missing_template_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_template(&dir.path().join("template.xlsx"), "Template").is_err());
    }
}
