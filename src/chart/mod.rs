//! Gantt chart rendering.
//!
//! [`ChartLayout::build`] turns a snapshot of activities into bars, rows and
//! ticks in date space; the raster stage draws that onto a PNG.

mod layout;
mod raster;

use std::path::{Path, PathBuf};

use image::ImageFormat;
use tracing::info;

use crate::error::Result;
use crate::model::Activity;

pub use layout::{Bar, ChartLayout, LABEL_OFFSET_DAYS, LEAD_DAYS, TRAIL_DAYS};
pub use raster::{draw, PlotArea};

/// Output image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
        }
    }
}

/// Render the Gantt chart of `activities` to a PNG at `output`, keeping
/// only `filter_person`'s activities when given.
///
/// Returns `Ok(None)` and writes nothing if no activity is left to draw.
pub fn render(
    activities: &[Activity],
    filter_person: Option<&str>,
    output: &Path,
    size: ChartSize,
) -> Result<Option<PathBuf>> {
    let Some(layout) = ChartLayout::build(activities, filter_person) else {
        info!(person = filter_person, "no activities to chart");
        return Ok(None);
    };
    let image = draw(&layout, size.width, size.height);
    image.save_with_format(output, ImageFormat::Png)?;
    info!(path = %output.display(), bars = layout.bars.len(), "chart saved");
    Ok(Some(output.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use crate::store::ActivityStore;
    use image::Rgb;

    fn store() -> ActivityStore {
        let mut store = ActivityStore::new();
        store
            .add("Frontend", "2024-05-01", "2024-05-15", "Marco", Status::InProgress)
            .unwrap();
        store
            .add("Backend", "2024-05-10", "2024-05-30", "Laura", Status::NotStarted)
            .unwrap();
        store
    }

    #[test]
    fn writes_png_for_filtered_person() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gantt_Marco.png");
        let store = store();

        let out = render(store.activities(), Some("Marco"), &path, ChartSize::default()).unwrap();
        assert_eq!(out.as_deref(), Some(path.as_path()));

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (1200, 800));

        let layout = ChartLayout::build(store.activities(), Some("Marco")).unwrap();
        let area = PlotArea::new(&layout, 1200, 800);
        let x = area.x_of(chrono::NaiveDate::from_ymd_opt(2024, 5, 8).unwrap());
        let y = area.row_center(0);
        assert_eq!(*img.get_pixel(x as u32, y as u32), Rgb(Status::InProgress.color()));
    }

    #[test]
    fn empty_selection_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gantt_Nobody.png");
        let out = render(store().activities(), Some("Nobody"), &path, ChartSize::default()).unwrap();
        assert!(out.is_none());
        assert!(!path.exists());
    }

    #[test]
    fn blank_person_renders_everyone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gantt_completo.png");
        let out = render(store().activities(), Some(""), &path, ChartSize::default()).unwrap();
        assert_eq!(out.as_deref(), Some(path.as_path()));
        assert_eq!(ChartLayout::build(store().activities(), Some("")).unwrap().bars.len(), 2);
    }

    #[test]
    fn custom_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gantt_completo.png");
        let size = ChartSize {
            width: 640,
            height: 480,
        };
        render(store().activities(), None, &path, size).unwrap();
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (640, 480));
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("chart.png");
        assert!(render(store().activities(), None, &path, ChartSize::default()).is_err());
    }
}
