use super::scan::MatchRecord;
use crate::error::Result;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;
use tracing::{debug, error};

/// Header row of the output sheet.
pub const COLUMNS: [&str; 7] = [
    "Index",
    "CIK",
    "Company Name",
    "Form Type",
    "Date Filed",
    "File Name",
    "Auditor",
];

/// Write `matches` to a single-sheet workbook at `path`, replacing any existing file.
///
/// Returns the number of data rows written.
pub fn write(path: &Path, matches: &[MatchRecord]) -> Result<usize> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let bold = Format::new().set_bold();
    for (col, title) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &bold)?;
    }

    for (i, record) in matches.iter().enumerate() {
        let row = i as u32 + 1;
        let filing = &record.filing;

        sheet.write_number(row, 0, filing.ordinal as f64)?;
        match filing.cik.trim().parse::<u64>() {
            Ok(cik) => sheet.write_number(row, 1, cik as f64)?,
            Err(_) => sheet.write_string(row, 1, &filing.cik)?,
        };
        sheet.write_string(row, 2, &filing.company_name)?;
        sheet.write_string(row, 3, &filing.form_type)?;
        sheet.write_string(row, 4, &filing.date_filed)?;
        sheet.write_string(row, 5, &filing.file_name)?;
        if let Some(auditor) = &record.auditor {
            sheet.write_string(row, 6, auditor)?;
        }
    }
    sheet.autofit();

    workbook.save(path).map_err(|err| {
        error!("failed to save spreadsheet to {:?}, error({err})", path);
        err
    })?;
    debug!("{} rows written to {:?}", matches.len(), path);

    Ok(matches.len())
}
