//! Rendering of refractive index and extinction coefficient plots.
use crate::output::unique_file_path;
use crate::sweep::OpticalResult;
use anyhow::{Context, Result, ensure};
use log::warn;
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Size of rendered figures in pixels
const FIGURE_SIZE: (u32, u32) = (1280, 960);

/// File stem for the refractive index figure
const N_FIGURE_STEM: &str = "n_vs_wavelength";

/// File stem for the extinction coefficient figure
const K_FIGURE_STEM: &str = "k_vs_wavelength";

/// Label for the wavelength axis of both figures
const X_LABEL: &str = "Wavelength (um)";

/// Wavelength axis used when no wavelength is finite
const FALLBACK_WAVELENGTH_RANGE: Range<f64> = 0.0..1.0;

/// Refractive index axis used when no value of n is finite
const FALLBACK_N_RANGE: Range<f64> = 0.0..5.0;

/// Extinction coefficient axis used when no value of k is positive
const FALLBACK_K_RANGE: Range<f64> = 1e-10..1.0;

/// The image format used for saved figures
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotFormat {
    /// Portable network graphics
    #[default]
    Png,
    /// Scalable vector graphics
    Svg,
}

impl PlotFormat {
    /// The file extension for this format
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

/// Padded axis range covering all finite values, or `None` if there are none
fn linear_range(values: impl IntoIterator<Item = f64>) -> Option<Range<f64>> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

    let pad = if max > min {
        (max - min) * 0.05
    } else {
        min.abs().max(1.0) * 0.05
    };

    Some((min - pad)..(max + pad))
}

/// Axis range for a log scale covering all positive finite values.
///
/// Zero, negative and non-finite values cannot appear on a log axis and are ignored.
fn log_range(values: impl IntoIterator<Item = f64>) -> Option<Range<f64>> {
    let range = linear_range(values.into_iter().filter(|&v| v > 0.0).map(f64::log10))?;

    Some(10f64.powf(range.start)..10f64.powf(range.end))
}

/// Draw refractive index against wavelength on a linear axis
fn draw_refractive_index<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    result: &OpticalResult,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let series = result.refractive_index_series();
    let x_range = linear_range(series.iter().map(|&(lambda, _)| lambda))
        .unwrap_or(FALLBACK_WAVELENGTH_RANGE);
    let y_range = linear_range(series.iter().map(|&(_, n)| n)).unwrap_or_else(|| {
        warn!("No finite values of n to plot");
        FALLBACK_N_RANGE
    });

    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(root)
        .caption("Refractive index", ("sans-serif", 32))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)?;

    chart.configure_mesh().x_desc(X_LABEL).y_desc("n").draw()?;
    chart.draw_series(LineSeries::new(
        series.into_iter().filter(|(_, n)| n.is_finite()),
        BLUE.stroke_width(2),
    ))?;

    root.present()?;

    Ok(())
}

/// Draw both extinction coefficients against wavelength on a log axis
fn draw_extinction<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    result: &OpticalResult,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let series = result.extinction_series();
    let x_range = linear_range(series.iter().map(|&(lambda, _, _)| lambda))
        .unwrap_or(FALLBACK_WAVELENGTH_RANGE);

    // k is zero everywhere for transparent materials, which leaves an empty log axis
    let y_range =
        log_range(series.iter().flat_map(|&(_, k1, k2)| [k1, k2])).unwrap_or(FALLBACK_K_RANGE);

    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(root)
        .caption("Extinction coefficient", ("sans-serif", 32))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range.log_scale())?;

    chart.configure_mesh().x_desc(X_LABEL).y_desc("k").draw()?;

    let plottable = |k: f64| k.is_finite() && k > 0.0;
    chart
        .draw_series(LineSeries::new(
            series
                .iter()
                .filter(|&&(_, k1, _)| plottable(k1))
                .map(|&(lambda, k1, _)| (lambda, k1)),
            BLUE.stroke_width(2),
        ))?
        .label("k1 (Urbach Zone)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));
    chart
        .draw_series(LineSeries::new(
            series
                .iter()
                .filter(|&&(_, _, k2)| plottable(k2))
                .map(|&(lambda, _, k2)| (lambda, k2)),
            RED.stroke_width(2),
        ))?
        .label("k2 (Intrinsic Zone)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;

    Ok(())
}

/// Save figures of n and k against wavelength to `output_dir`.
///
/// # Returns
///
/// The paths of the refractive index and extinction coefficient figures
pub fn plot_results(
    output_dir: &Path,
    result: &OpticalResult,
    format: PlotFormat,
) -> Result<(PathBuf, PathBuf)> {
    ensure!(!result.is_empty(), "Nothing to plot");

    let n_path = render_with(output_dir, N_FIGURE_STEM, format, result, Figure::RefractiveIndex)?;
    let k_path = render_with(output_dir, K_FIGURE_STEM, format, result, Figure::Extinction)?;

    Ok((n_path, k_path))
}

/// The figures that can be drawn
#[derive(Clone, Copy)]
enum Figure {
    RefractiveIndex,
    Extinction,
}

impl Figure {
    fn draw<DB: DrawingBackend>(
        self,
        root: &DrawingArea<DB, Shift>,
        result: &OpticalResult,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        match self {
            Self::RefractiveIndex => draw_refractive_index(root, result),
            Self::Extinction => draw_extinction(root, result),
        }
    }
}

/// Render one figure to a new file in `output_dir`
fn render_with(
    output_dir: &Path,
    stem: &str,
    format: PlotFormat,
    result: &OpticalResult,
    figure: Figure,
) -> Result<PathBuf> {
    let file_path = unique_file_path(output_dir, stem, format.extension());
    match format {
        PlotFormat::Png => figure.draw(
            &BitMapBackend::new(&file_path, FIGURE_SIZE).into_drawing_area(),
            result,
        ),
        PlotFormat::Svg => figure.draw(
            &SVGBackend::new(&file_path, FIGURE_SIZE).into_drawing_area(),
            result,
        ),
    }
    .with_context(|| format!("Failed to render {}", file_path.display()))?;

    Ok(file_path)
}
