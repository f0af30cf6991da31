use plotters::prelude::*;

use super::font::{draw_text, text_height, Anchor};
use super::layout::{table_row_height, Rect, ReportLayout};
use super::palette::{GRID, INK, MUTED, PAPER};
use super::{draw_err, Canvas};
use crate::aggregation::{NumericSummary, OverallSummary, PitchTypeSummary, ReportData};
use crate::error::RenderError;

const MISSING: &str = "-";

pub(crate) fn format_mph(value: f64) -> String {
    format!("{value:.1}")
}

pub(crate) fn format_pct(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{v:.1}%"))
}

fn format_mean(summary: &Option<NumericSummary>, decimals: usize) -> String {
    summary
        .as_ref()
        .map_or_else(|| MISSING.to_string(), |s| format!("{:.*}", decimals, s.mean))
}

fn frame(canvas: &Canvas<'_>, rect: &Rect, color: &RGBColor) -> Result<(), RenderError> {
    canvas
        .draw(&Rectangle::new(
            [(rect.x, rect.y), (rect.right() - 1, rect.bottom() - 1)],
            color.stroke_width(1),
        ))
        .map_err(draw_err)
}

pub fn draw_header(
    canvas: &Canvas<'_>,
    layout: &ReportLayout,
    data: &ReportData,
) -> Result<(), RenderError> {
    let rect = layout.header;
    let large = layout.large();
    let small = layout.small();
    let title_y = rect.y + (rect.height - text_height(large)) / 2;
    draw_text(canvas, &data.title, (rect.x, title_y), Anchor::Left, large, &INK)?;

    let gap = text_height(small);
    let block = text_height(layout.medium()) + gap + text_height(small);
    let top = rect.y + (rect.height - block) / 2;
    draw_text(
        canvas,
        "OUTING SUMMARY",
        (rect.right(), top),
        Anchor::Right,
        layout.medium(),
        &INK,
    )?;
    draw_text(
        canvas,
        &data.window.label(),
        (rect.right(), top + text_height(layout.medium()) + gap),
        Anchor::Right,
        small,
        &MUTED,
    )?;

    canvas
        .draw(&PathElement::new(
            vec![(rect.x, rect.bottom() - 1), (rect.right(), rect.bottom() - 1)],
            INK.stroke_width(layout.unit),
        ))
        .map_err(draw_err)
}

pub fn draw_summary_boxes(
    canvas: &Canvas<'_>,
    layout: &ReportLayout,
    overall: &OverallSummary,
) -> Result<(), RenderError> {
    let entries = [
        ("PITCHES", overall.total_pitches.to_string()),
        ("AVG VELO", format_mph(overall.avg_velocity)),
        ("MAX VELO", format_mph(overall.max_velocity)),
        ("MIN VELO", format_mph(overall.min_velocity)),
        ("PZR%", format_pct(overall.zone_rate)),
        ("STRIKE%", format_pct(overall.strike_rate)),
    ];

    let pad = (layout.boxes.height / 8).max(2);
    let inner = Rect {
        x: layout.boxes.x,
        y: layout.boxes.y + pad,
        width: layout.boxes.width,
        height: layout.boxes.height - 2 * pad,
    };
    let label_scale = layout.small();
    let value_scale = layout.large();
    let block = text_height(label_scale) + pad + text_height(value_scale);

    for (cell, (label, value)) in inner.columns(entries.len()).iter().zip(entries.iter()) {
        let boxed = Rect {
            x: cell.x + pad,
            y: cell.y,
            width: cell.width - 2 * pad,
            height: cell.height,
        };
        frame(canvas, &boxed, &GRID)?;
        let top = boxed.y + (boxed.height - block) / 2;
        draw_text(canvas, label, (boxed.center_x(), top), Anchor::Center, label_scale, &MUTED)?;
        draw_text(
            canvas,
            value,
            (boxed.center_x(), top + text_height(label_scale) + pad),
            Anchor::Center,
            value_scale,
            &INK,
        )?;
    }
    Ok(())
}

const TABLE_HEADERS: [&str; 10] = [
    "PITCH TYPE",
    "COUNT",
    "VELO",
    "IVB",
    "HB",
    "SPIN",
    "HAA",
    "VAA",
    "PZR%",
    "STRIKE%",
];

fn table_row(summary: &PitchTypeSummary) -> [String; 10] {
    [
        summary.pitch_type.to_string(),
        summary.count.to_string(),
        format_mph(summary.velocity.mean),
        format_mean(&summary.induced_vert_break, 1),
        format_mean(&summary.horz_break, 1),
        format_mean(&summary.spin_rate, 0),
        format_mean(&summary.horz_approach_angle, 2),
        format_mean(&summary.vert_approach_angle, 2),
        format_pct(summary.zone_rate),
        format_pct(summary.strike_rate),
    ]
}

/// One row per summary in the given order. The layout sizes the table and
/// its text scale so every row fits.
pub fn draw_pitch_table(
    canvas: &Canvas<'_>,
    layout: &ReportLayout,
    summaries: &[PitchTypeSummary],
    colors: &[RGBColor],
) -> Result<(), RenderError> {
    let rect = layout.table;
    let scale = layout.table_scale;
    let pad = text_height(scale) / 2;
    let row_height = table_row_height(scale);

    // first column is twice as wide to fit the swatch and name
    let unit = Rect {
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: row_height,
    }
    .columns(TABLE_HEADERS.len() + 1);
    let mut cells = Vec::with_capacity(TABLE_HEADERS.len());
    cells.push(Rect {
        width: unit[1].right() - unit[0].x,
        ..unit[0]
    });
    cells.extend(unit.iter().skip(2).copied());

    let header_band = Rect {
        height: row_height,
        ..rect
    };
    canvas
        .draw(&Rectangle::new(
            [
                (header_band.x, header_band.y),
                (header_band.right() - 1, header_band.bottom() - 1),
            ],
            INK.filled(),
        ))
        .map_err(draw_err)?;
    for (index, (cell, title)) in cells.iter().zip(TABLE_HEADERS.iter()).enumerate() {
        let (x, anchor) = if index == 0 {
            (cell.x + pad, Anchor::Left)
        } else {
            (cell.center_x(), Anchor::Center)
        };
        draw_text(canvas, title, (x, rect.y + pad), anchor, scale, &PAPER)?;
    }

    let mut y = rect.y + row_height;
    for (row_index, (summary, color)) in summaries.iter().zip(colors).enumerate() {
        if row_index % 2 == 1 {
            canvas
                .draw(&Rectangle::new(
                    [(rect.x, y), (rect.right() - 1, y + row_height - 1)],
                    GRID.mix(0.5).filled(),
                ))
                .map_err(draw_err)?;
        }

        let swatch = text_height(scale);
        let swatch_x = cells[0].x + pad;
        canvas
            .draw(&Rectangle::new(
                [(swatch_x, y + pad), (swatch_x + swatch - 1, y + pad + swatch - 1)],
                color.filled(),
            ))
            .map_err(draw_err)?;

        for (index, (cell, value)) in cells.iter().zip(table_row(summary)).enumerate() {
            let (x, anchor) = if index == 0 {
                (cell.x + 2 * pad + swatch, Anchor::Left)
            } else {
                (cell.center_x(), Anchor::Center)
            };
            draw_text(canvas, &value, (x, y + pad), anchor, scale, &INK)?;
        }
        y += row_height;
    }

    canvas
        .draw(&PathElement::new(
            vec![(rect.x, y), (rect.right(), y)],
            GRID.stroke_width(1),
        ))
        .map_err(draw_err)
}
