//! The three chart panels.
//!
//! Plotters handles the coordinate mapping and the series; grid lines, tick
//! labels and titles are drawn by hand so every piece of text goes through
//! the bitmap font.

use std::ops::Range;

use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

use super::font::{draw_text, text_height, text_width, Anchor};
use super::layout::{Rect, ReportLayout};
use super::palette::{GRID, GUIDE, INK, MUTED, PAPER};
use super::{draw_err, Canvas};
use crate::aggregation::PitchTypeSummary;
use crate::error::RenderError;

type Chart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const MOVEMENT_LIMIT_IN: f64 = 25.0;
const PLATE_SIDE_LIMIT_IN: f64 = 20.0;
const PLATE_HEIGHT_MAX_FT: f64 = 5.5;
const ZONE_HALF_WIDTH_IN: f64 = 8.5;
const ZONE_BOTTOM_FT: f64 = 1.5;
const ZONE_TOP_FT: f64 = 3.5;

/// Smallest 1/2/5 x 10^k step giving at most `max_ticks` intervals over `span`.
pub(crate) fn nice_step(span: f64, max_ticks: usize) -> f64 {
    if span.is_nan() || span <= 0.0 {
        return 1.0;
    }
    let raw = span / max_ticks.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

/// Multiples of `step` inside `range`, inclusive.
pub(crate) fn ticks(range: &Range<f64>, step: f64) -> Vec<f64> {
    let first = (range.start / step - 1e-9).ceil() as i64;
    let last = (range.end / step + 1e-9).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

fn tick_label(value: f64, step: f64) -> String {
    if step >= 1.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

struct Axis {
    range: Range<f64>,
    step: f64,
    title: &'static str,
}

/// Title, axis titles and the plotting sub-area of one chart panel.
struct Panel<'b> {
    area: Canvas<'b>,
    plot: Rect,
}

fn chart_panel<'b>(
    canvas: &Canvas<'b>,
    rect: &Rect,
    layout: &ReportLayout,
    title: &str,
    x: &Axis,
    y: &Axis,
) -> Result<Panel<'b>, RenderError> {
    let small = layout.small();
    let medium = layout.medium();
    let pad = text_height(small);

    draw_text(canvas, title, (rect.x, rect.y), Anchor::Left, medium, &INK)?;

    let gutter = ticks(&y.range, y.step)
        .iter()
        .map(|value| text_width(&tick_label(*value, y.step), small))
        .max()
        .unwrap_or(0)
        + pad;

    let top = rect.y + text_height(medium) + 2 * pad + text_height(small);
    let plot = Rect {
        x: rect.x + gutter,
        y: top,
        width: (rect.width - gutter - pad).max(1),
        height: (rect.bottom() - top - 2 * text_height(small) - 3 * pad).max(1),
    };

    // y axis title sits above the plot since the font has no vertical text
    draw_text(
        canvas,
        y.title,
        (plot.x, top - pad - text_height(small)),
        Anchor::Left,
        small,
        &MUTED,
    )?;
    draw_text(
        canvas,
        x.title,
        (plot.center_x(), plot.bottom() + text_height(small) + 2 * pad),
        Anchor::Center,
        small,
        &MUTED,
    )?;

    let area = canvas
        .clone()
        .shrink((plot.x, plot.y), (plot.width as u32, plot.height as u32));
    Ok(Panel { area, plot })
}

/// Grid lines and tick labels at every tick, then the plot frame.
fn draw_grid(
    canvas: &Canvas<'_>,
    chart: &mut Chart<'_, '_>,
    panel: &Panel<'_>,
    layout: &ReportLayout,
    x: &Axis,
    y: &Axis,
) -> Result<(), RenderError> {
    let small = layout.small();
    let pad = text_height(small);
    let plot = panel.plot;

    for value in ticks(&x.range, x.step) {
        chart
            .draw_series(LineSeries::new(
                [(value, y.range.start), (value, y.range.end)],
                GRID.stroke_width(1),
            ))
            .map_err(draw_err)?;
        let (px, _) = chart.backend_coord(&(value, y.range.start));
        draw_text(
            canvas,
            &tick_label(value, x.step),
            (px, plot.bottom() + pad / 2),
            Anchor::Center,
            small,
            &MUTED,
        )?;
    }
    for value in ticks(&y.range, y.step) {
        chart
            .draw_series(LineSeries::new(
                [(x.range.start, value), (x.range.end, value)],
                GRID.stroke_width(1),
            ))
            .map_err(draw_err)?;
        let (_, py) = chart.backend_coord(&(x.range.start, value));
        draw_text(
            canvas,
            &tick_label(value, y.step),
            (plot.x - pad / 2, py - text_height(small) / 2),
            Anchor::Right,
            small,
            &MUTED,
        )?;
    }

    canvas
        .draw(&Rectangle::new(
            [(plot.x, plot.y), (plot.right() - 1, plot.bottom() - 1)],
            GUIDE.stroke_width(1),
        ))
        .map_err(draw_err)
}

/// Builds the chart over the panel's plotting area and draws its grid.
fn build_chart<'a, 'b>(
    canvas: &Canvas<'b>,
    panel: &'a Panel<'b>,
    layout: &ReportLayout,
    x: &Axis,
    y: &Axis,
) -> Result<Chart<'a, 'b>, RenderError> {
    let mut chart = ChartBuilder::on(&panel.area)
        .build_cartesian_2d(x.range.clone(), y.range.clone())
        .map_err(draw_err)?;
    draw_grid(canvas, &mut chart, panel, layout, x, y)?;
    Ok(chart)
}

/// Dashed segment between two data points, dashes measured in pixels.
fn dashed_line(
    canvas: &Canvas<'_>,
    chart: &Chart<'_, '_>,
    from: (f64, f64),
    to: (f64, f64),
    dash: i32,
    width: u32,
) -> Result<(), RenderError> {
    let (x0, y0) = chart.backend_coord(&from);
    let (x1, y1) = chart.backend_coord(&to);
    let (dx, dy) = ((x1 - x0) as f64, (y1 - y0) as f64);
    let length = (dx * dx + dy * dy).sqrt();
    if length < 1.0 {
        return Ok(());
    }
    let dash = dash.max(2) as f64;
    let mut start = 0.0;
    while start < length {
        let end = (start + dash).min(length);
        let point = |t: f64| {
            (
                x0 + (dx * t / length).round() as i32,
                y0 + (dy * t / length).round() as i32,
            )
        };
        canvas
            .draw(&PathElement::new(
                vec![point(start), point(end)],
                GUIDE.stroke_width(width),
            ))
            .map_err(draw_err)?;
        start += dash * 2.0;
    }
    Ok(())
}

/// Legend box anchored to the plot's top-right corner and the top-left
/// corner of each entry. Entries run down a column and wrap into further
/// columns when the plot is too short.
fn legend_slots(
    plot: &Rect,
    count: usize,
    line: i32,
    column_width: i32,
    pad: i32,
) -> (Rect, Vec<(i32, i32)>) {
    let per_column = ((plot.height - 3 * pad) / line).max(1) as usize;
    let columns = count.div_ceil(per_column) as i32;
    let rows = count.min(per_column) as i32;
    let width = columns * column_width + pad;
    let height = rows * line + pad;
    let boxed = Rect {
        x: (plot.right() - pad - width).max(plot.x),
        y: plot.y + pad,
        width,
        height,
    };
    let slots = (0..count)
        .map(|index| {
            let column = (index / per_column) as i32;
            let row = (index % per_column) as i32;
            (
                boxed.x + pad + column * column_width,
                boxed.y + pad + row * line,
            )
        })
        .collect();
    (boxed, slots)
}

/// Colour swatch and name for every pitch type, drawn over the series.
fn draw_legend(
    canvas: &Canvas<'_>,
    plot: &Rect,
    layout: &ReportLayout,
    summaries: &[PitchTypeSummary],
    colors: &[RGBColor],
) -> Result<(), RenderError> {
    if summaries.is_empty() {
        return Ok(());
    }
    let scale = layout.small();
    let swatch = text_height(scale);
    let pad = swatch / 2 + 1;
    let label_width = summaries
        .iter()
        .map(|summary| text_width(summary.pitch_type.as_str(), scale))
        .max()
        .unwrap_or(0);
    let column_width = swatch + pad + label_width + pad;
    let (boxed, slots) = legend_slots(plot, summaries.len(), swatch + pad, column_width, pad);

    canvas
        .draw(&Rectangle::new(
            [(boxed.x, boxed.y), (boxed.right() - 1, boxed.bottom() - 1)],
            PAPER.mix(0.9).filled(),
        ))
        .map_err(draw_err)?;
    canvas
        .draw(&Rectangle::new(
            [(boxed.x, boxed.y), (boxed.right() - 1, boxed.bottom() - 1)],
            GUIDE.stroke_width(1),
        ))
        .map_err(draw_err)?;

    for ((summary, color), (x, y)) in summaries.iter().zip(colors).zip(slots) {
        canvas
            .draw(&Rectangle::new(
                [(x, y), (x + swatch - 1, y + swatch - 1)],
                color.filled(),
            ))
            .map_err(draw_err)?;
        draw_text(
            canvas,
            summary.pitch_type.as_str(),
            (x + swatch + pad, y),
            Anchor::Left,
            scale,
            &INK,
        )?;
    }
    Ok(())
}

fn point_radius(layout: &ReportLayout) -> u32 {
    layout.unit * 2 + 1
}

/// Horizontal break against induced vertical break, axes fixed at +/-25 in.
pub fn draw_movement(
    canvas: &Canvas<'_>,
    layout: &ReportLayout,
    summaries: &[PitchTypeSummary],
    colors: &[RGBColor],
) -> Result<(), RenderError> {
    let limit = MOVEMENT_LIMIT_IN;
    let axis = |title| Axis {
        range: -limit..limit,
        step: 5.0,
        title,
    };
    let (x, y) = (
        axis("HORIZONTAL BREAK (IN)"),
        axis("INDUCED VERTICAL BREAK (IN)"),
    );
    let panel = chart_panel(canvas, &layout.movement, layout, "PITCH MOVEMENT", &x, &y)?;
    let mut chart = build_chart(canvas, &panel, layout, &x, &y)?;

    let dash = text_height(layout.small()) / 2;
    dashed_line(canvas, &chart, (-limit, 0.0), (limit, 0.0), dash, layout.unit)?;
    dashed_line(canvas, &chart, (0.0, -limit), (0.0, limit), dash, layout.unit)?;

    let radius = point_radius(layout);
    for (summary, color) in summaries.iter().zip(colors) {
        let points = summary.points.iter().filter_map(|point| point.movement);
        chart
            .draw_series(points.map(|(hb, ivb)| {
                Circle::new(
                    (hb.clamp(-limit, limit), ivb.clamp(-limit, limit)),
                    radius,
                    color.mix(0.8).filled(),
                )
            }))
            .map_err(draw_err)?;
    }
    draw_legend(canvas, &panel.plot, layout, summaries, colors)
}

/// Velocity of every pitch in sequence order, one line per pitch type.
pub fn draw_velocity(
    canvas: &Canvas<'_>,
    layout: &ReportLayout,
    summaries: &[PitchTypeSummary],
    colors: &[RGBColor],
) -> Result<(), RenderError> {
    let total: u32 = summaries
        .iter()
        .flat_map(|summary| summary.points.iter().map(|point| point.sequence))
        .max()
        .unwrap_or(1);
    let (low, high) = summaries.iter().fold((f64::MAX, f64::MIN), |(low, high), s| {
        (low.min(s.velocity.min), high.max(s.velocity.max))
    });
    let (low, high) = if low <= high {
        ((low - 2.0).floor(), (high + 2.0).ceil())
    } else {
        (60.0, 100.0)
    };

    let x_range = 0.0..(total + 1) as f64;
    let x_step = nice_step(x_range.end, 10).max(1.0);
    let y_range = low..high;
    let y_step = nice_step(high - low, 6);
    let x = Axis {
        range: x_range,
        step: x_step,
        title: "PITCH #",
    };
    let y = Axis {
        range: y_range,
        step: y_step,
        title: "VELOCITY (MPH)",
    };
    let panel = chart_panel(canvas, &layout.velocity, layout, "VELOCITY BY PITCH", &x, &y)?;
    let mut chart = build_chart(canvas, &panel, layout, &x, &y)?;

    let radius = point_radius(layout).saturating_sub(1).max(1);
    for (summary, color) in summaries.iter().zip(colors) {
        let series: Vec<(f64, f64)> = summary
            .points
            .iter()
            .map(|point| (point.sequence as f64, point.velocity_mph))
            .collect();
        chart
            .draw_series(LineSeries::new(
                series.iter().copied(),
                color.stroke_width(layout.unit),
            ))
            .map_err(draw_err)?;
        chart
            .draw_series(
                series
                    .iter()
                    .map(|&point| Circle::new(point, radius, color.filled())),
            )
            .map_err(draw_err)?;
    }
    draw_legend(canvas, &panel.plot, layout, summaries, colors)
}

/// Plate location from the pitcher's view with the rule-book zone dashed.
pub fn draw_strike_zone(
    canvas: &Canvas<'_>,
    layout: &ReportLayout,
    summaries: &[PitchTypeSummary],
    colors: &[RGBColor],
) -> Result<(), RenderError> {
    let x = Axis {
        range: -PLATE_SIDE_LIMIT_IN..PLATE_SIDE_LIMIT_IN,
        step: 5.0,
        title: "PLATE SIDE (IN)",
    };
    let y = Axis {
        range: 0.0..PLATE_HEIGHT_MAX_FT,
        step: 1.0,
        title: "PLATE HEIGHT (FT)",
    };
    let panel = chart_panel(canvas, &layout.zone, layout, "STRIKE ZONE", &x, &y)?;
    let mut chart = build_chart(canvas, &panel, layout, &x, &y)?;

    let corners = [
        (-ZONE_HALF_WIDTH_IN, ZONE_BOTTOM_FT),
        (ZONE_HALF_WIDTH_IN, ZONE_BOTTOM_FT),
        (ZONE_HALF_WIDTH_IN, ZONE_TOP_FT),
        (-ZONE_HALF_WIDTH_IN, ZONE_TOP_FT),
    ];
    let dash = text_height(layout.small()) / 2;
    for index in 0..corners.len() {
        let next = corners[(index + 1) % corners.len()];
        dashed_line(canvas, &chart, corners[index], next, dash, layout.unit + 1)?;
    }

    let radius = point_radius(layout);
    for (summary, color) in summaries.iter().zip(colors) {
        let points = summary
            .points
            .iter()
            .filter_map(|point| point.plate_location);
        chart
            .draw_series(points.map(|(side_ft, height_ft)| {
                Circle::new(
                    (
                        (side_ft * 12.0).clamp(-PLATE_SIDE_LIMIT_IN, PLATE_SIDE_LIMIT_IN),
                        height_ft.clamp(0.0, PLATE_HEIGHT_MAX_FT),
                    ),
                    radius,
                    color.mix(0.8).filled(),
                )
            }))
            .map_err(draw_err)?;
    }
    Ok(())
}
