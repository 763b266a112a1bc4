//! Chart rendering.
//!
//! Consumes plain numeric series and writes a PNG image; no simulation
//! state reaches this module.

use anyhow::{Context, Result};
use plotters::prelude::*;
use plotters::style::colors::colormaps::{ColorMap, ViridisRGB};
use std::path::Path;

const CHART_SIZE: (u32, u32) = (2048, 1024);

/// Render the final earnings of every player as one dot per player,
/// colored by value.
pub fn render_population_scatter(file: &Path, final_earnings: &[f64]) -> Result<()> {
    let root = BitMapBackend::new(file, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).context("failed to fill chart background")?;

    let (y_min, y_max) = value_range(final_earnings);
    let x_max = final_earnings.len() as f64 + 1.0;

    let mut chart = ChartBuilder::on(&root)
        .caption("Earnings per person after all days", ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)
        .context("failed to build chart axes")?;

    chart
        .configure_mesh()
        .x_desc("People")
        .y_desc("Earnings")
        .draw()
        .context("failed to draw chart mesh")?;

    chart
        .draw_series(LineSeries::new(
            [(0.0, 0.0), (x_max, 0.0)],
            BLACK.stroke_width(2),
        ))
        .context("failed to draw zero baseline")?;

    chart
        .draw_series(final_earnings.iter().enumerate().map(|(idx, &earnings)| {
            let color = ViridisRGB.get_color_normalized(earnings, y_min, y_max);
            Circle::new((idx as f64 + 1.0, earnings), 3, color.filled())
        }))
        .context("failed to draw earnings series")?;

    root.present()
        .with_context(|| format!("failed to write {file:?}"))?;

    Ok(())
}

/// Render the final earnings of every player as sorted bars against a
/// zero baseline.
pub fn render_population_bars(file: &Path, final_earnings: &[f64]) -> Result<()> {
    let mut sorted = final_earnings.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let root = BitMapBackend::new(file, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).context("failed to fill chart background")?;

    let (y_min, y_max) = value_range(&sorted);
    let x_max = sorted.len() as f64 + 1.0;

    let mut chart = ChartBuilder::on(&root)
        .caption("Earnings per person after all days", ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)
        .context("failed to build chart axes")?;

    chart
        .configure_mesh()
        .x_desc("People")
        .y_desc("Earnings")
        .draw()
        .context("failed to draw chart mesh")?;

    chart
        .draw_series(sorted.iter().enumerate().map(|(idx, &earnings)| {
            let x = idx as f64 + 1.0;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, earnings)], BLUE.mix(0.7).filled())
        }))
        .context("failed to draw earnings bars")?;

    chart
        .draw_series(LineSeries::new(
            [(0.0, 0.0), (x_max, 0.0)],
            BLACK.stroke_width(2),
        ))
        .context("failed to draw zero baseline")?;

    root.present()
        .with_context(|| format!("failed to write {file:?}"))?;

    Ok(())
}

/// Render one player's cumulative earnings against the day index.
pub fn render_trajectory(file: &Path, daily_running_total: &[f64]) -> Result<()> {
    let root = BitMapBackend::new(file, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).context("failed to fill chart background")?;

    let (y_min, y_max) = value_range(daily_running_total);
    let x_max = daily_running_total.len() as f64 + 1.0;

    let mut chart = ChartBuilder::on(&root)
        .caption("Earnings per day", ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)
        .context("failed to build chart axes")?;

    chart
        .configure_mesh()
        .x_desc("Day")
        .y_desc("Earnings")
        .draw()
        .context("failed to draw chart mesh")?;

    chart
        .draw_series(LineSeries::new(
            [(0.0, 0.0), (x_max, 0.0)],
            BLACK.stroke_width(2),
        ))
        .context("failed to draw zero baseline")?;

    chart
        .draw_series(LineSeries::new(
            daily_running_total
                .iter()
                .enumerate()
                .map(|(idx, &total)| (idx as f64 + 1.0, total)),
            BLUE.mix(0.4).stroke_width(4),
        ))
        .context("failed to draw earnings series")?;

    root.present()
        .with_context(|| format!("failed to write {file:?}"))?;

    Ok(())
}

/// Y-axis range covering the values and the zero baseline, with padding
/// so the range is never degenerate.
fn value_range(values: &[f64]) -> (f64, f64) {
    let mut min = 0.0f64;
    let mut max = 0.0f64;
    for &val in values {
        min = min.min(val);
        max = max.max(val);
    }

    let pad = ((max - min) * 0.05).max(1.0);
    (min - pad, max + pad)
}
