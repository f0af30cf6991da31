use super::font::text_height;
use crate::error::RenderError;

/// Pixel rectangle in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Splits into `count` equal columns.
    pub fn columns(&self, count: usize) -> Vec<Rect> {
        let count = count.max(1) as i32;
        (0..count)
            .map(|index| {
                let left = self.x + self.width * index / count;
                let right = self.x + self.width * (index + 1) / count;
                Rect {
                    x: left,
                    y: self.y,
                    width: right - left,
                    height: self.height,
                }
            })
            .collect()
    }
}

/// Height of one pitch table row, header included, at `scale`.
pub fn table_row_height(scale: u32) -> i32 {
    let text = text_height(scale);
    text + 2 * (text / 2)
}

/// Report template scaled to the requested image size. Fractions of the
/// height: header 8%, summary boxes 10%, charts 52%, table the rest. The
/// table grows into the chart band when it needs more rows, down to a 30%
/// chart band, and then falls back to smaller text.
#[derive(Debug, Clone, Copy)]
pub struct ReportLayout {
    pub header: Rect,
    pub boxes: Rect,
    pub movement: Rect,
    pub velocity: Rect,
    pub zone: Rect,
    pub table: Rect,
    /// Base text scale; small/medium/large derive from it.
    pub unit: u32,
    /// Text scale of the pitch table.
    pub table_scale: u32,
}

impl ReportLayout {
    /// Lays out a report whose table holds `table_rows` pitch types.
    pub fn new(width: u32, height: u32, table_rows: usize) -> Result<Self, RenderError> {
        let w = width as i32;
        let h = height as i32;
        let margin = (w / 40).max(8);
        let inner_w = w - 2 * margin;
        let frac = |pct: i32| h * pct / 100;
        let unit = (height / 650).max(1);

        let header = Rect {
            x: margin,
            y: margin / 2,
            width: inner_w,
            height: frac(8),
        };
        let boxes = Rect {
            x: margin,
            y: header.bottom(),
            width: inner_w,
            height: frac(10),
        };

        let charts_top = boxes.bottom() + frac(2);
        let bottom = h - margin / 2;
        let band = bottom - charts_top - frac(2);
        let default_table = band - frac(52);
        let max_table = band - frac(30);

        // header row plus one row per pitch type
        let lines = table_rows as i32 + 1;
        let table_scale = (1..=unit + 1)
            .rev()
            .find(|&scale| lines * table_row_height(scale) <= max_table)
            .ok_or(RenderError::TooManyPitchTypes {
                count: table_rows,
                max: (max_table / table_row_height(1) - 1).max(0) as usize,
            })?;
        let table_height = (lines * table_row_height(table_scale)).max(default_table);
        let charts_height = band - table_height;

        let gap = margin;
        let half = (inner_w - gap) / 2;
        let movement = Rect {
            x: margin,
            y: charts_top,
            width: half,
            height: charts_height,
        };
        let right_x = margin + half + gap;
        let upper = (charts_height - gap / 2) * 9 / 20;
        let velocity = Rect {
            x: right_x,
            y: charts_top,
            width: half,
            height: upper,
        };
        let zone = Rect {
            x: right_x,
            y: charts_top + upper + gap / 2,
            width: half,
            height: charts_height - upper - gap / 2,
        };

        let table = Rect {
            x: margin,
            y: charts_top + charts_height + frac(2),
            width: inner_w,
            height: table_height.max(0),
        };

        Ok(Self {
            header,
            boxes,
            movement,
            velocity,
            zone,
            table,
            unit,
            table_scale,
        })
    }

    pub fn small(&self) -> u32 {
        self.unit
    }

    pub fn medium(&self) -> u32 {
        self.unit + 1
    }

    pub fn large(&self) -> u32 {
        self.unit * 2 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_stacked(layout: &ReportLayout, height: i32) {
        assert!(layout.header.bottom() <= layout.boxes.y);
        assert!(layout.boxes.bottom() <= layout.movement.y);
        assert!(layout.velocity.bottom() <= layout.zone.y);
        assert!(layout.movement.right() <= layout.velocity.x);
        assert!(layout.movement.bottom() <= layout.table.y);
        assert!(layout.table.bottom() <= height);
    }

    #[test]
    fn regions_stack_without_overlap() {
        let layout = ReportLayout::new(1700, 1300, 3).unwrap();
        assert_stacked(&layout, 1300);
        assert_eq!(layout.unit, 2);
        assert_eq!(layout.table_scale, 3);
    }

    #[test]
    fn table_grows_to_hold_every_pitch_type() {
        let few = ReportLayout::new(1700, 1300, 6).unwrap();
        for rows in 7..=12 {
            let layout = ReportLayout::new(1700, 1300, rows).unwrap();
            assert_stacked(&layout, 1300);
            let needed = (rows as i32 + 1) * table_row_height(layout.table_scale);
            assert!(layout.table.height >= needed, "{rows} rows do not fit");
            assert!(layout.movement.height <= few.movement.height);
        }
    }

    #[test]
    fn long_tables_shrink_their_text() {
        let layout = ReportLayout::new(1700, 1300, 30).unwrap();
        assert_stacked(&layout, 1300);
        assert!(layout.table_scale < layout.medium());
        assert!(layout.table.height >= 31 * table_row_height(layout.table_scale));
        assert!(layout.movement.height >= 1300 * 30 / 100);
    }

    #[test]
    fn tables_beyond_the_smallest_text_are_refused() {
        let err = ReportLayout::new(850, 650, 200).unwrap_err();
        assert!(matches!(
            err,
            RenderError::TooManyPitchTypes { count: 200, max } if max > 0 && max < 200
        ));
    }

    #[test]
    fn columns_cover_the_full_width() {
        let rect = Rect {
            x: 10,
            y: 0,
            width: 101,
            height: 5,
        };
        let columns = rect.columns(3);
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].x, 10);
        assert_eq!(columns[2].right(), rect.right());
        assert_eq!(columns[0].right(), columns[1].x);
    }
}
