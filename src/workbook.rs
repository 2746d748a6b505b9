//! Spreadsheet export and import.
//!
//! The workbook has an `Activities` sheet with one row per activity and an
//! empty `GANTT` sheet kept for an embedded chart. Import also understands
//! workbooks written by the older prototype (`Attività` sheet, Italian
//! headers).

use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use tracing::info;

use crate::dates::parse_date;
use crate::error::{GanttError, Result};
use crate::model::{Activity, Status};

pub const ACTIVITIES_SHEET: &str = "Activities";
pub const CHART_SHEET: &str = "GANTT";
pub const HEADERS: [&str; 6] = ["ID", "Name", "StartDate", "EndDate", "Person", "Status"];

static EMPTY: Data = Data::Empty;

const LEGACY_SHEET: &str = "Attività";
const LEGACY_HEADERS: [&str; 6] = [
    "ID",
    "Nome_Attività",
    "Data_Inizio",
    "Data_Fine",
    "Persona_Riferimento",
    "Stato",
];

/// Write `activities` to a new workbook at `path`, replacing any existing file.
pub fn export(activities: &[Activity], path: &Path) -> Result<PathBuf> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    let sheet = workbook.add_worksheet();
    sheet.set_name(ACTIVITIES_SHEET)?;
    for (col, title) in (0u16..).zip(HEADERS) {
        sheet.write_string_with_format(0, col, title, &header)?;
    }
    for (row, activity) in (1u32..).zip(activities) {
        sheet.write_number(row, 0, f64::from(activity.id))?;
        sheet.write_string(row, 1, &activity.name)?;
        sheet.write_datetime_with_format(row, 2, &excel_date(activity.start_date)?, &date_format)?;
        sheet.write_datetime_with_format(row, 3, &excel_date(activity.end_date)?, &date_format)?;
        sheet.write_string(row, 4, &activity.person)?;
        sheet.write_string(row, 5, activity.status.as_str())?;
    }

    workbook.add_worksheet().set_name(CHART_SHEET)?;
    workbook.save(path)?;

    info!(path = %path.display(), count = activities.len(), "workbook saved");
    Ok(path.to_path_buf())
}

fn excel_date(date: NaiveDate) -> Result<ExcelDateTime> {
    let year = u16::try_from(date.year())
        .map_err(|_| GanttError::workbook(format!("year {} out of range", date.year())))?;
    // month and day always fit in a u8
    Ok(ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8)?)
}

/// Read the activities back from the workbook at `path`.
pub fn import(path: &Path) -> Result<Vec<Activity>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheets = workbook.sheet_names();

    let (sheet, headers) = if sheets.iter().any(|s| s == ACTIVITIES_SHEET) {
        (ACTIVITIES_SHEET, HEADERS)
    } else if sheets.iter().any(|s| s == LEGACY_SHEET) {
        (LEGACY_SHEET, LEGACY_HEADERS)
    } else {
        return Err(GanttError::workbook(format!(
            "{} has no '{ACTIVITIES_SHEET}' sheet",
            path.display()
        )));
    };

    let range = workbook.worksheet_range(sheet)?;
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };
    let columns = locate_columns(header_row, &headers)?;

    let mut activities = Vec::new();
    for (offset, row) in rows.enumerate() {
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        // header is row 1 in spreadsheet terms
        let line = offset + 2;
        let cell = |i: usize| row.get(columns[i]).unwrap_or(&EMPTY);
        activities.push(Activity {
            id: cell_id(cell(0), line)?,
            name: cell_string(cell(1)),
            start_date: cell_date(cell(2), line)?,
            end_date: cell_date(cell(3), line)?,
            person: cell_string(cell(4)),
            status: match cell(5) {
                Data::Empty => Status::default(),
                other => Status::parse(&cell_string(other))?,
            },
        });
    }
    Ok(activities)
}

fn locate_columns(header_row: &[Data], headers: &[&str; 6]) -> Result<[usize; 6]> {
    let mut columns = [0; 6];
    for (slot, name) in columns.iter_mut().zip(headers) {
        *slot = header_row
            .iter()
            .position(|c| matches!(c, Data::String(s) if s.trim() == *name))
            .ok_or_else(|| GanttError::workbook(format!("missing column '{name}'")))?;
    }
    Ok(columns)
}

fn cell_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn cell_id(cell: &Data, line: usize) -> Result<u32> {
    let id = match cell {
        Data::Int(i) => u32::try_from(*i).ok(),
        Data::Float(f) if f.fract() == 0.0 && *f >= 1.0 && *f <= f64::from(u32::MAX) => {
            Some(*f as u32)
        }
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    id.filter(|&id| id > 0)
        .ok_or_else(|| GanttError::workbook(format!("row {line}: invalid id '{cell}'")))
}

fn cell_date(cell: &Data, line: usize) -> Result<NaiveDate> {
    let date = match cell {
        Data::DateTime(dt) => dt.as_datetime().map(|d| d.date()),
        Data::Float(serial) => serial_date(*serial),
        Data::Int(serial) => serial_date(*serial as f64),
        Data::String(s) | Data::DateTimeIso(s) => parse_date(s).ok(),
        _ => None,
    };
    date.ok_or_else(|| GanttError::workbook(format!("row {line}: invalid date '{cell}'")))
}

/// Convert an Excel serial day number (1900 date system) to a date.
fn serial_date(serial: f64) -> Option<NaiveDate> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(chrono::Duration::days(serial.trunc() as i64))
}
