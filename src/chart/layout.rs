use chrono::{Datelike, Duration, NaiveDate};

use crate::model::{Activity, Status};

/// Days of padding before the earliest start on the time axis.
pub const LEAD_DAYS: i64 = 3;
/// Days of padding after the latest end, leaving room for person labels.
pub const TRAIL_DAYS: i64 = 15;
/// Offset of the person label from the end of its bar.
pub const LABEL_OFFSET_DAYS: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    /// Index into [`ChartLayout::rows`].
    pub row: usize,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub status: Status,
    pub label: String,
    pub label_at: NaiveDate,
}

impl Bar {
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn color(&self) -> [u8; 3] {
        self.status.color()
    }
}

/// Everything the chart shows, in date space. Pixel placement happens in
/// the raster stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartLayout {
    pub title: String,
    /// Activity names in first-seen order; row 0 is drawn at the bottom.
    pub rows: Vec<String>,
    pub bars: Vec<Bar>,
    pub axis_start: NaiveDate,
    pub axis_end: NaiveDate,
    /// Mondays inside the axis range.
    pub ticks: Vec<NaiveDate>,
    pub legend: Vec<Status>,
}

impl ChartLayout {
    /// Lay out `activities`, keeping only `filter_person`'s when given.
    /// Returns `None` when nothing is left to draw.
    /// A blank filter counts as no filter.
    pub fn build(activities: &[Activity], filter_person: Option<&str>) -> Option<Self> {
        let filter_person = filter_person.filter(|p| !p.trim().is_empty());
        let mut selected: Vec<&Activity> = activities
            .iter()
            .filter(|a| filter_person.map_or(true, |p| a.person == p))
            .collect();
        if selected.is_empty() {
            return None;
        }
        selected.sort_by_key(|a| a.start_date);

        let first = selected.iter().map(|a| a.start_date).min()?;
        let last = selected.iter().map(|a| a.end_date).max()?;
        let axis_start = first
            .checked_sub_signed(Duration::days(LEAD_DAYS))
            .unwrap_or(NaiveDate::MIN);
        let axis_end = last
            .checked_add_signed(Duration::days(TRAIL_DAYS))
            .unwrap_or(NaiveDate::MAX);

        let mut rows: Vec<String> = Vec::new();
        let mut bars = Vec::with_capacity(selected.len());
        for activity in selected {
            let row = match rows.iter().position(|r| *r == activity.name) {
                Some(i) => i,
                None => {
                    rows.push(activity.name.clone());
                    rows.len() - 1
                }
            };
            bars.push(Bar {
                row,
                start: activity.start_date,
                end: activity.end_date,
                status: activity.status,
                label: activity.person.clone(),
                label_at: activity
                    .end_date
                    .checked_add_signed(Duration::days(LABEL_OFFSET_DAYS))
                    .unwrap_or(activity.end_date),
            });
        }

        let title = match filter_person {
            Some(person) => format!("Gantt chart - {person}"),
            None => "Gantt chart".to_string(),
        };

        Some(Self {
            title,
            rows,
            bars,
            axis_start,
            axis_end,
            ticks: weekly_ticks(axis_start, axis_end),
            legend: Status::ALL.to_vec(),
        })
    }

    pub fn total_days(&self) -> i64 {
        (self.axis_end - self.axis_start).num_days()
    }
}

/// Every Monday in `[start, end]`.
fn weekly_ticks(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let to_monday = (7 - i64::from(start.weekday().num_days_from_monday())) % 7;
    let mut next = start.checked_add_signed(Duration::days(to_monday));
    let mut ticks = Vec::new();
    while let Some(tick) = next.filter(|t| *t <= end) {
        ticks.push(tick);
        next = tick.checked_add_signed(Duration::days(7));
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn activity(id: u32, name: &str, start: NaiveDate, end: NaiveDate, person: &str, status: Status) -> Activity {
        Activity {
            id,
            name: name.into(),
            start_date: start,
            end_date: end,
            person: person.into(),
            status,
        }
    }

    fn sample() -> Vec<Activity> {
        vec![
            activity(1, "Frontend", date(2024, 5, 1), date(2024, 5, 15), "Marco", Status::InProgress),
            activity(2, "Backend", date(2024, 5, 10), date(2024, 5, 30), "Laura", Status::NotStarted),
            activity(3, "Testing", date(2024, 5, 25), date(2024, 6, 5), "Marco", Status::NotStarted),
            activity(4, "Docs", date(2024, 6, 1), date(2024, 6, 10), "Giulia", Status::NotStarted),
            activity(5, "Deploy", date(2024, 6, 10), date(2024, 6, 15), "Laura", Status::NotStarted),
        ]
    }

    #[test]
    fn axis_range_is_padded() {
        let layout = ChartLayout::build(&sample(), None).unwrap();
        assert_eq!(layout.axis_start, date(2024, 4, 28));
        assert_eq!(layout.axis_end, date(2024, 6, 30));
        assert_eq!(layout.title, "Gantt chart");
    }

    #[test]
    fn ticks_are_mondays_inside_range() {
        let layout = ChartLayout::build(&sample(), None).unwrap();
        assert_eq!(layout.ticks.first(), Some(&date(2024, 4, 29)));
        assert_eq!(layout.ticks.last(), Some(&date(2024, 6, 24)));
        assert_eq!(layout.ticks.len(), 9);
        assert!(layout.ticks.iter().all(|d| d.weekday() == Weekday::Mon));
    }

    #[test]
    fn tick_on_range_start_when_it_is_monday() {
        assert_eq!(
            weekly_ticks(date(2024, 4, 29), date(2024, 5, 6)),
            vec![date(2024, 4, 29), date(2024, 5, 6)]
        );
    }

    #[test]
    fn filtered_single_bar() {
        let all = sample();
        let layout = ChartLayout::build(&all[..2], Some("Marco")).unwrap();
        assert_eq!(layout.title, "Gantt chart - Marco");
        assert_eq!(layout.bars.len(), 1);
        let bar = &layout.bars[0];
        assert_eq!(bar.days(), 14);
        assert_eq!(bar.color(), Status::InProgress.color());
        assert_eq!(bar.label, "Marco");
        assert_eq!(bar.label_at, date(2024, 5, 16));
    }

    #[test]
    fn empty_selection_yields_nothing() {
        assert!(ChartLayout::build(&[], None).is_none());
        assert!(ChartLayout::build(&sample(), Some("Nobody")).is_none());
    }

    #[test]
    fn bars_sorted_by_start() {
        let mut rows = sample();
        rows.reverse();
        let layout = ChartLayout::build(&rows, None).unwrap();
        let starts: Vec<_> = layout.bars.iter().map(|b| b.start).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
        assert_eq!(layout.rows[0], "Frontend");
    }

    #[test]
    fn same_name_shares_a_row() {
        let rows = vec![
            activity(1, "Review", date(2024, 5, 1), date(2024, 5, 3), "Marco", Status::Completed),
            activity(2, "Build", date(2024, 5, 2), date(2024, 5, 9), "Laura", Status::Delayed),
            activity(3, "Review", date(2024, 5, 10), date(2024, 5, 12), "Marco", Status::Paused),
        ];
        let layout = ChartLayout::build(&rows, None).unwrap();
        assert_eq!(layout.rows, vec!["Review", "Build"]);
        assert_eq!(layout.bars.iter().map(|b| b.row).collect::<Vec<_>>(), vec![0, 1, 0]);
    }

    #[test]
    fn blank_filter_means_everyone() {
        for blank in ["", "   "] {
            let layout = ChartLayout::build(&sample(), Some(blank)).unwrap();
            assert_eq!(layout.title, "Gantt chart");
            assert_eq!(layout.bars.len(), 5);
        }
    }

    #[test]
    fn calendar_edges_are_clamped() {
        let end = NaiveDate::MAX;
        let start = end - Duration::days(5);
        let late = vec![activity(1, "Late", start, end, "Marco", Status::Delayed)];
        let layout = ChartLayout::build(&late, None).unwrap();
        assert_eq!(layout.axis_end, NaiveDate::MAX);
        assert_eq!(layout.axis_start, start - Duration::days(LEAD_DAYS));
        assert_eq!(layout.bars[0].label_at, NaiveDate::MAX);
        assert!(layout.ticks.iter().all(|t| *t <= NaiveDate::MAX));

        let start = NaiveDate::MIN;
        let early = vec![activity(1, "Early", start, start + Duration::days(5), "Marco", Status::Paused)];
        let layout = ChartLayout::build(&early, None).unwrap();
        assert_eq!(layout.axis_start, NaiveDate::MIN);
        assert!(layout.total_days() > 0);
    }

    #[test]
    fn legend_lists_every_status() {
        let layout = ChartLayout::build(&sample()[..1], None).unwrap();
        assert_eq!(layout.legend, Status::ALL.to_vec());
    }
}
