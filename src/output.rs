use crate::dates::format_date;
use crate::model::Activity;

const HEADERS: [&str; 6] = ["ID", "Name", "Start", "End", "Person", "Status"];

/// Render activities as an aligned plain-text table with `DD/MM/YYYY` dates.
pub fn format_activity_table<'a>(activities: impl IntoIterator<Item = &'a Activity>) -> String {
    let rows: Vec<[String; 6]> = activities
        .into_iter()
        .map(|a| {
            [
                a.id.to_string(),
                a.name.clone(),
                format_date(a.start_date),
                format_date(a.end_date),
                a.person.clone(),
                a.status.to_string(),
            ]
        })
        .collect();
    if rows.is_empty() {
        return String::new();
    }

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

pub fn format_activity_detail(activity: &Activity) -> String {
    let mut out = String::new();
    out.push_str(&format!("ID:       {}\n", activity.id));
    out.push_str(&format!("Name:     {}\n", activity.name));
    out.push_str(&format!("Start:    {}\n", format_date(activity.start_date)));
    out.push_str(&format!("End:      {}\n", format_date(activity.end_date)));
    out.push_str(&format!("Days:     {}\n", activity.duration_days()));
    out.push_str(&format!("Person:   {}\n", activity.person));
    out.push_str(&format!("Status:   {}\n", activity.status));
    out
}

pub fn format_persons(persons: &[String]) -> String {
    persons.iter().map(|p| format!("{p}\n")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use chrono::NaiveDate;

    fn make_activity(id: u32, name: &str, person: &str, status: Status) -> Activity {
        Activity {
            id,
            name: name.to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
            person: person.to_string(),
            status,
        }
    }

    #[test]
    fn table_has_header_and_rows() {
        let rows = vec![
            make_activity(1, "Frontend", "Marco", Status::InProgress),
            make_activity(2, "Backend", "Laura", Status::NotStarted),
        ];
        let out = format_activity_table(&rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID  Name"));
        assert!(lines[1].contains("01/05/2024"));
        assert!(lines[1].contains("15/05/2024"));
        assert!(lines[2].ends_with("NotStarted"));
    }

    #[test]
    fn columns_are_aligned() {
        let rows = vec![
            make_activity(1, "A", "Marco", Status::Paused),
            make_activity(10, "Longer name", "Laura", Status::Paused),
        ];
        let out = format_activity_table(&rows);
        let starts: Vec<usize> = out.lines().map(|l| l.find("01/05/2024").unwrap_or(0)).skip(1).collect();
        assert_eq!(starts[0], starts[1]);
    }

    #[test]
    fn empty_table() {
        let none: Vec<Activity> = Vec::new();
        assert_eq!(format_activity_table(&none), "");
    }

    #[test]
    fn detail() {
        let out = format_activity_detail(&make_activity(3, "Testing", "Marco", Status::Delayed));
        assert!(out.contains("Name:     Testing\n"));
        assert!(out.contains("Days:     14\n"));
        assert!(out.contains("Status:   Delayed\n"));
    }

    #[test]
    fn persons_one_per_line() {
        assert_eq!(format_persons(&["Marco".into(), "Laura".into()]), "Marco\nLaura\n");
    }
}
