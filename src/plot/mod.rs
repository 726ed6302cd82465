use std::error::Error as StdError;
use std::ops::Range;
use std::path::{Path, PathBuf};

use num_traits::AsPrimitive;
use plotters::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::helpers::helpers::min_max;
use crate::pipeline::{PlotData, Visualizer};
use crate::Float;


const TITLE: &str = "Simple Linear Regression";
const X_LABEL: &str = "Independent variable";
const Y_LABEL: &str = "Dependent variable";

/// Share of the data range added on each side of an axis
const AXIS_PADDING: f64 = 0.05;

/// Error variants from rendering a plot
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("nothing to plot")]
    Empty,
    #[error("failed to draw {}: {message}", .path.display())]
    Backend { path: PathBuf, message: String },
}

/// SVG scatter and line plot writer
///
/// Draws the observed points in green, the out-of-sample predictions in red
/// and the fitted line in blue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgPlotter {
    path: PathBuf,
    size: (u32, u32),
}

impl SvgPlotter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        SvgPlotter {
            path: path.into(),
            size: (1400, 800),
        }
    }

    /// Set the image size in pixels.
    ///
    /// Defaults to `(1400, 800)` if not set.
    pub fn size(mut self, size: (u32, u32)) -> Self {
        self.size = size;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn draw(
        &self,
        plot: &PlotData<f64>,
        x_range: Range<f64>,
        y_range: Range<f64>,
    ) -> Result<(), Box<dyn StdError>> {
        let root = SVGBackend::new(&self.path, self.size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(TITLE, ("sans-serif", 36))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .axis_desc_style(("sans-serif", 28))
            .draw()?;

        chart.draw_series(
            plot.observed
                .iter()
                .map(|&point| Circle::new(point, 4, GREEN.filled())),
        )?;
        chart.draw_series(
            plot.out_of_sample
                .iter()
                .map(|&point| Circle::new(point, 4, RED.filled())),
        )?;
        chart.draw_series(LineSeries::new(
            plot.fitted_line.iter().copied(),
            BLUE.stroke_width(2),
        ))?;

        root.present()?;
        Ok(())
    }
}

impl<F: Float> Visualizer<F> for SvgPlotter {
    type Error = PlotError;

    fn render(&self, plot: &PlotData<F>) -> Result<(), PlotError> {
        let plot = to_f64(plot);
        let (x_range, y_range) = axis_ranges(&plot).ok_or(PlotError::Empty)?;
        self.draw(&plot, x_range, y_range)
            .map_err(|e| PlotError::Backend {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        info!(path = %self.path.display(), "plot written");
        Ok(())
    }
}

/// This function computes the axis ranges covering every point of the plot,
/// padded on both sides. A degenerate range is widened by one unit on each
/// side. Returns `None` for an empty plot.
pub fn axis_ranges(plot: &PlotData<f64>) -> Option<(Range<f64>, Range<f64>)> {
    let (x_min, x_max) = min_max(plot.points().map(|(x, _)| x))?;
    let (y_min, y_max) = min_max(plot.points().map(|(_, y)| y))?;
    Some((padded(x_min, x_max), padded(y_min, y_max)))
}

fn padded(min: f64, max: f64) -> Range<f64> {
    let width = max - min;
    if width > 0. {
        (min - AXIS_PADDING * width)..(max + AXIS_PADDING * width)
    } else {
        (min - 1.)..(max + 1.)
    }
}

fn to_f64<F: Float>(plot: &PlotData<F>) -> PlotData<f64> {
    let convert = |points: &[(F, F)]| -> Vec<(f64, f64)> {
        points.iter().map(|&(x, y)| (x.as_(), y.as_())).collect()
    };
    PlotData {
        observed: convert(&plot.observed),
        fitted_line: convert(&plot.fitted_line),
        out_of_sample: convert(&plot.out_of_sample),
    }
}
