//! Training and validation loss curves.

use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;

use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use tracing::debug;

use crate::colorization::common::error::{ColorizeError, Result};
use crate::colorization::training::TrainingHistory;

const PLOT_SIZE: (u32, u32) = (800, 480);

/// Font family every label on the chart is drawn with.
const FONT_FAMILY: &str = "sans-serif";

/// Shipped with the crate so plotting never depends on host fonts.
static FONT_BYTES: &[u8] = include_bytes!("../../../assets/DejaVuSans.ttf");

/// Registers the bundled font under [`FONT_FAMILY`] on first use.
fn ensure_font() -> Result<()> {
    static REGISTERED: OnceLock<std::result::Result<(), String>> = OnceLock::new();
    REGISTERED
        .get_or_init(|| {
            register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES).map_err(|_| "InvalidFont".to_string())
        })
        .clone()
        .map_err(|e| ColorizeError::PlotError(format!("bundled font: {}", e)))
}

/// X (epoch) and Y (loss) ranges covering both curves.
pub fn loss_axis_ranges(history: &TrainingHistory) -> Option<(Range<f64>, Range<f64>)> {
    let first = history.epochs().first()?.epoch as f64;
    let last = history.last()?.epoch as f64;
    let x = if last > first { first..last } else { first - 0.5..first + 0.5 };

    let max = history
        .train_losses()
        .into_iter()
        .chain(history.val_losses())
        .filter(|v| v.is_finite())
        .fold(0.0f64, f64::max);
    let y = 0.0..if max > 0.0 { max * 1.1 } else { 1.0 };

    Some((x, y))
}

fn plot_err<E: std::fmt::Debug>(e: E) -> ColorizeError {
    ColorizeError::PlotError(format!("{:?}", e))
}

/// Renders both curves against epoch number into a PNG at `path`.
pub fn plot_losses(history: &TrainingHistory, path: &Path) -> Result<()> {
    let (x_range, y_range) = loss_axis_ranges(history)
        .ok_or_else(|| ColorizeError::PlotError("no epochs recorded".to_string()))?;

    ensure_font()?;
    debug!("Plotting {} epochs to {}", history.len(), path.display());

    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Colorization loss", (FONT_FAMILY, 20))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("epoch number")
        .y_desc("loss")
        .draw()
        .map_err(plot_err)?;

    let train: Vec<(f64, f64)> = history.epochs().iter().map(|e| (e.epoch as f64, e.train_loss)).collect();
    let valid: Vec<(f64, f64)> = history.epochs().iter().map(|e| (e.epoch as f64, e.val_loss)).collect();

    for (points, color, label) in [(train, BLUE, "training loss"), (valid, RED, "validation loss")] {
        chart
            .draw_series(LineSeries::new(points.iter().copied(), &color))
            .map_err(plot_err)?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        chart
            .draw_series(points.iter().map(|&p| Circle::new(p, 3, color.filled())))
            .map_err(plot_err)?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}
