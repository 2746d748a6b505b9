use chrono::NaiveDate;
use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Rgb, RgbImage};

use super::layout::ChartLayout;
use crate::dates::format_date;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const GRID: Rgb<u8> = Rgb([225, 225, 225]);

const GLYPH: u32 = 8;
const TOP: u32 = 48;
const BOTTOM: u32 = 56;
const RIGHT: u32 = 24;
const MIN_LEFT: u32 = 80;

/// Pixel geometry of the plot area for a given layout and image size.
#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
    axis_start: NaiveDate,
    total_days: i64,
    row_count: u32,
}

impl PlotArea {
    pub fn new(layout: &ChartLayout, width: u32, height: u32) -> Self {
        let longest = layout.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let left = (longest * GLYPH + 16).max(MIN_LEFT).min(width / 3);
        Self {
            left,
            top: TOP,
            width: width.saturating_sub(left + RIGHT).max(1),
            height: height.saturating_sub(TOP + BOTTOM).max(1),
            axis_start: layout.axis_start,
            total_days: layout.total_days().max(1),
            row_count: layout.rows.len().max(1) as u32,
        }
    }

    pub fn x_of(&self, date: NaiveDate) -> i64 {
        let days = (date - self.axis_start).num_days();
        i64::from(self.left) + days * i64::from(self.width) / self.total_days
    }

    pub fn row_height(&self) -> u32 {
        self.height / self.row_count
    }

    /// Vertical center of `row`, counting up from the bottom of the plot.
    pub fn row_center(&self, row: usize) -> i64 {
        let from_top = (i64::from(self.row_count) - 1 - row as i64).max(0);
        let h = i64::from(self.height) * (2 * from_top + 1) / (2 * i64::from(self.row_count));
        i64::from(self.top) + h
    }

    fn right(&self) -> i64 {
        i64::from(self.left + self.width)
    }

    fn bottom(&self) -> i64 {
        i64::from(self.top + self.height)
    }
}

/// Draw `layout` onto a new `width` x `height` image.
pub fn draw(layout: &ChartLayout, width: u32, height: u32) -> RgbImage {
    let mut canvas = Canvas(RgbImage::from_pixel(width, height, WHITE));
    let area = PlotArea::new(layout, width, height);

    let title_x = i64::from(width / 2) - text_width(&layout.title, 2) / 2;
    canvas.text(title_x, 16, &layout.title, BLACK, 2);

    draw_grid_and_ticks(&mut canvas, layout, &area);
    draw_rows(&mut canvas, layout, &area);
    canvas.outline(area.left as i64, area.top as i64, area.right(), area.bottom(), BLACK);
    draw_legend(&mut canvas, layout, &area);

    let x_label = "Date";
    let label_x = i64::from(area.left) + i64::from(area.width / 2) - text_width(x_label, 1) / 2;
    canvas.text(label_x, i64::from(height) - 16, x_label, BLACK, 1);
    canvas.text(8, i64::from(TOP) - 14, "Activity", BLACK, 1);

    canvas.0
}

fn draw_grid_and_ticks(canvas: &mut Canvas, layout: &ChartLayout, area: &PlotArea) {
    let label_width = text_width("00/00/0000", 1) + 12;
    let spacing = (7 * i64::from(area.width) / area.total_days).max(1);
    // Label every n-th tick so the labels never overlap.
    let every = ((label_width + spacing - 1) / spacing).max(1) as usize;

    for (i, tick) in layout.ticks.iter().enumerate() {
        let x = area.x_of(*tick);
        canvas.vline(x, area.top as i64 + 1, area.bottom() - 1, GRID);
        canvas.vline(x, area.bottom(), area.bottom() + 4, BLACK);
        if i % every == 0 {
            let label = format_date(*tick);
            canvas.text(x - text_width(&label, 1) / 2, area.bottom() + 10, &label, BLACK, 1);
        }
    }
}

fn draw_rows(canvas: &mut Canvas, layout: &ChartLayout, area: &PlotArea) {
    for (i, name) in layout.rows.iter().enumerate() {
        let y = area.row_center(i);
        let x = i64::from(area.left) - 8 - text_width(name, 1);
        canvas.text(x.max(2), y - 4, name, BLACK, 1);
        canvas.hline(i64::from(area.left) - 4, i64::from(area.left), y, BLACK);
    }

    let half = i64::from((area.row_height() / 4).clamp(3, 24));
    for bar in &layout.bars {
        let y = area.row_center(bar.row);
        let (x0, x1) = (area.x_of(bar.start), area.x_of(bar.end));
        canvas.fill(x0, y - half, x1, y + half, Rgb(bar.color()));
        canvas.outline(x0, y - half, x1, y + half, BLACK);
        canvas.text(area.x_of(bar.label_at), y - 4, &bar.label, BLACK, 1);
    }
}

fn draw_legend(canvas: &mut Canvas, layout: &ChartLayout, area: &PlotArea) {
    let longest = layout
        .legend
        .iter()
        .map(|s| text_width(s.label(), 1))
        .max()
        .unwrap_or(0);
    let line = 16;
    let box_w = longest + 40;
    let box_h = line * (layout.legend.len() as i64 + 1) + 8;
    let x0 = area.right() - box_w - 8;
    let y0 = i64::from(area.top) + 8;

    canvas.fill(x0, y0, x0 + box_w, y0 + box_h, WHITE);
    canvas.outline(x0, y0, x0 + box_w, y0 + box_h, BLACK);
    canvas.text(x0 + 8, y0 + 6, "Status", BLACK, 1);
    for (i, status) in layout.legend.iter().enumerate() {
        let y = y0 + 6 + line * (i as i64 + 1);
        canvas.fill(x0 + 8, y, x0 + 20, y + 10, Rgb(status.color()));
        canvas.outline(x0 + 8, y, x0 + 20, y + 10, BLACK);
        canvas.text(x0 + 28, y + 1, status.label(), BLACK, 1);
    }
}

fn text_width(text: &str, scale: u32) -> i64 {
    i64::from(GLYPH * scale) * text.chars().count() as i64
}

fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// Clipping drawing primitives over an RGB image.
struct Canvas(RgbImage);

impl Canvas {
    fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && x < i64::from(self.0.width()) && y < i64::from(self.0.height()) {
            self.0.put_pixel(x as u32, y as u32, color);
        }
    }

    fn hline(&mut self, x0: i64, x1: i64, y: i64, color: Rgb<u8>) {
        for x in x0.min(x1)..=x0.max(x1) {
            self.put(x, y, color);
        }
    }

    fn vline(&mut self, x: i64, y0: i64, y1: i64, color: Rgb<u8>) {
        for y in y0.min(y1)..=y0.max(y1) {
            self.put(x, y, color);
        }
    }

    fn fill(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
        for y in y0..=y1 {
            self.hline(x0, x1, y, color);
        }
    }

    fn outline(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
        self.hline(x0, x1, y0, color);
        self.hline(x0, x1, y1, color);
        self.vline(x0, y0, y1, color);
        self.vline(x1, y0, y1, color);
    }

    fn text(&mut self, x: i64, y: i64, text: &str, color: Rgb<u8>, scale: u32) {
        let step = i64::from(GLYPH * scale);
        for (i, c) in text.chars().enumerate() {
            let origin = x + i as i64 * step;
            for (gy, bits) in glyph(c).iter().enumerate() {
                for gx in 0..8 {
                    if bits & (1 << gx) == 0 {
                        continue;
                    }
                    for sy in 0..i64::from(scale) {
                        for sx in 0..i64::from(scale) {
                            let px = origin + gx * i64::from(scale) + sx;
                            let py = y + gy as i64 * i64::from(scale) + sy;
                            self.put(px, py, color);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Activity, Status};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn layout() -> ChartLayout {
        let rows = vec![Activity {
            id: 1,
            name: "Frontend".into(),
            start_date: date(2024, 5, 1),
            end_date: date(2024, 5, 15),
            person: "Marco".into(),
            status: Status::InProgress,
        }];
        ChartLayout::build(&rows, None).unwrap()
    }

    #[test]
    fn axis_maps_range_onto_plot_width() {
        let layout = layout();
        let area = PlotArea::new(&layout, 1200, 800);
        assert_eq!(area.x_of(layout.axis_start), i64::from(area.left));
        assert_eq!(area.x_of(layout.axis_end), i64::from(area.left + area.width));
        assert!(area.x_of(date(2024, 5, 1)) < area.x_of(date(2024, 5, 15)));
    }

    #[test]
    fn bar_is_filled_with_status_color() {
        let layout = layout();
        let img = draw(&layout, 1200, 800);
        assert_eq!(img.dimensions(), (1200, 800));

        let area = PlotArea::new(&layout, 1200, 800);
        let x = area.x_of(date(2024, 5, 8));
        let y = area.row_center(0);
        assert_eq!(*img.get_pixel(x as u32, y as u32), Rgb(Status::InProgress.color()));
    }

    #[test]
    fn earliest_row_is_drawn_at_the_bottom() {
        let rows = vec![
            Activity {
                id: 1,
                name: "Frontend".into(),
                start_date: date(2024, 5, 1),
                end_date: date(2024, 5, 15),
                person: "Marco".into(),
                status: Status::Completed,
            },
            Activity {
                id: 2,
                name: "Backend".into(),
                start_date: date(2024, 5, 10),
                end_date: date(2024, 5, 30),
                person: "Laura".into(),
                status: Status::Delayed,
            },
        ];
        let layout = ChartLayout::build(&rows, None).unwrap();
        let area = PlotArea::new(&layout, 1200, 800);
        assert!(area.row_center(0) > area.row_center(1));

        let img = draw(&layout, 1200, 800);
        let x = area.x_of(date(2024, 5, 12)) as u32;
        let low = *img.get_pixel(x, area.row_center(0) as u32);
        let high = *img.get_pixel(x, area.row_center(1) as u32);
        assert_eq!(low, Rgb(Status::Completed.color()));
        assert_eq!(high, Rgb(Status::Delayed.color()));
    }

    #[test]
    fn tiny_canvas_does_not_panic() {
        let img = draw(&layout(), 40, 30);
        assert_eq!(img.dimensions(), (40, 30));
    }

    #[test]
    fn glyph_falls_back_for_unknown_chars() {
        assert_ne!(glyph('A'), [0; 8]);
        assert_ne!(glyph('à'), [0; 8]);
        assert_eq!(glyph('\u{4e2d}'), glyph('?'));
    }
}
