//! PNG report rendering.
//!
//! The report is drawn into an in-memory RGB buffer with the plotters bitmap
//! backend and encoded with `image`. All text goes through the embedded bitmap
//! font, so identical input produces byte-identical output on every host.

mod charts;
mod font;
mod layout;
mod palette;
mod panels;

use std::io::Cursor;

use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregation::ReportData;
use crate::error::RenderError;

pub(crate) type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

pub(crate) fn draw_err<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Draw(err.to_string())
}

pub const MIN_WIDTH: u32 = 320;
pub const MIN_HEIGHT: u32 = 240;
/// Upper bound on either side; caps the RGB buffer near 200 MB.
pub const MAX_DIMENSION: u32 = 8192;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1700,
            height: 1300,
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> Result<(), RenderError> {
        let fits = |value: u32, min: u32| (min..=MAX_DIMENSION).contains(&value);
        if !fits(self.width, MIN_WIDTH) || !fits(self.height, MIN_HEIGHT) {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Renders the full report and returns the encoded PNG bytes.
pub fn render_report(data: &ReportData, options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
    if data.summaries.is_empty() {
        return Err(RenderError::NoSummaries);
    }
    options.validate()?;

    let (width, height) = (options.width, options.height);
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&palette::PAPER).map_err(draw_err)?;
        draw_report(&root, data, width, height)?;
        root.present().map_err(draw_err)?;
    }

    let image = RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| RenderError::Draw("pixel buffer does not match dimensions".to_string()))?;
    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    debug!(
        width,
        height,
        bytes = png.len(),
        pitch_types = data.summaries.len(),
        "Rendered report image"
    );
    Ok(png)
}

fn draw_report(
    root: &Canvas<'_>,
    data: &ReportData,
    width: u32,
    height: u32,
) -> Result<(), RenderError> {
    let layout = layout::ReportLayout::new(width, height, data.summaries.len())?;
    let colors = palette::pitch_colors(data.summaries.len());

    panels::draw_header(root, &layout, data)?;
    panels::draw_summary_boxes(root, &layout, &data.overall)?;
    charts::draw_movement(root, &layout, &data.summaries, &colors)?;
    charts::draw_velocity(root, &layout, &data.summaries, &colors)?;
    charts::draw_strike_zone(root, &layout, &data.summaries, &colors)?;
    panels::draw_pitch_table(root, &layout, &data.summaries, &colors)?;
    Ok(())
}
