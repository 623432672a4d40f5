//! Diagnostic plot rendering
//!
//! Nine deterministic plots per run: each state variable against time and
//! against distance covered, the three-series overlays, and the Cartesian
//! trajectory. All series are black; overlays distinguish their series by
//! line style (solid / dashed / dotted) and carry a legend. Each plot owns
//! its drawing area and presents it before the next plot starts, so figure
//! state never leaks between files.

use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::config::PlotConfig;
use crate::dataset::Dataset;
use crate::error::{Result, TwoBodyError};
use crate::run::RunDir;

/// Output file suffixes, in generation order
pub const PLOT_SUFFIXES: [&str; 9] = [
    "r_vs_t",
    "theta_vs_t",
    "pr_vs_t",
    "all_vs_t",
    "trajectory",
    "r_vs_x",
    "theta_vs_x",
    "pr_vs_x",
    "all_vs_x",
];

/// Line style of one series within a plot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

struct Series<'a> {
    label: &'a str,
    values: &'a [f64],
    style: LineStyle,
}

/// Render all nine plots for one run.
///
/// The plots are independent of each other; only the overall file set
/// matters. Returns the written paths in generation order.
pub fn render_all(run: &RunDir, data: &Dataset, cfg: &PlotConfig) -> Result<Vec<PathBuf>> {
    let (x, y) = data.cartesian();
    let mut written = Vec::with_capacity(PLOT_SUFFIXES.len());

    // State variables against time
    written.push(single(run, cfg, "r_vs_t", "r v/s t", "Time", "r", &data.t, &data.r)?);
    written.push(single(
        run, cfg, "theta_vs_t", "theta v/s t", "Time", "theta", &data.t, &data.theta,
    )?);
    written.push(single(
        run, cfg, "pr_vs_t", "p_r v/s t", "Time", "p_r", &data.t, &data.p_r,
    )?);
    written.push(combined(
        run,
        cfg,
        "all_vs_t",
        "r, theta and p_r v/s t",
        "Time",
        &data.t,
        data,
    )?);

    // Trajectory in the plane of motion
    let path = run.plot_file("trajectory");
    trajectory_plot(&path, cfg, &x, &y)?;
    println!("  ✓ {}", display_name(&path));
    written.push(path);

    // State variables against distance covered
    written.push(single(
        run, cfg, "r_vs_x", "r v/s x", "Distance Covered", "r", &x, &data.r,
    )?);
    written.push(single(
        run,
        cfg,
        "theta_vs_x",
        "theta v/s x",
        "Distance Covered",
        "theta",
        &x,
        &data.theta,
    )?);
    written.push(single(
        run,
        cfg,
        "pr_vs_x",
        "p_r v/s x",
        "Distance Covered",
        "p_r",
        &x,
        &data.p_r,
    )?);
    written.push(combined(
        run,
        cfg,
        "all_vs_x",
        "r, theta and p_r v/s x",
        "Distance Covered",
        &x,
        data,
    )?);

    Ok(written)
}

/// One solid series with its own y-axis label
#[allow(clippy::too_many_arguments)]
fn single(
    run: &RunDir,
    cfg: &PlotConfig,
    suffix: &str,
    title: &str,
    x_label: &str,
    y_label: &str,
    xs: &[f64],
    values: &[f64],
) -> Result<PathBuf> {
    let path = run.plot_file(suffix);
    let series = [Series {
        label: y_label,
        values,
        style: LineStyle::Solid,
    }];
    line_plot(&path, cfg, title, x_label, Some(y_label), xs, &series)?;
    println!("  ✓ {}", display_name(&path));
    Ok(path)
}

/// The r / theta / p_r overlay with a legend
fn combined(
    run: &RunDir,
    cfg: &PlotConfig,
    suffix: &str,
    title: &str,
    x_label: &str,
    xs: &[f64],
    data: &Dataset,
) -> Result<PathBuf> {
    let path = run.plot_file(suffix);
    let series = [
        Series {
            label: "r",
            values: &data.r,
            style: LineStyle::Solid,
        },
        Series {
            label: "theta",
            values: &data.theta,
            style: LineStyle::Dashed,
        },
        Series {
            label: "p_r",
            values: &data.p_r,
            style: LineStyle::Dotted,
        },
    ];
    line_plot(&path, cfg, title, x_label, None, xs, &series)?;
    println!("  ✓ {}", display_name(&path));
    Ok(path)
}

/// Draw one or more black series over a shared x axis and save as PNG
fn line_plot(
    path: &Path,
    cfg: &PlotConfig,
    title: &str,
    x_label: &str,
    y_label: Option<&str>,
    xs: &[f64],
    series: &[Series<'_>],
) -> Result<()> {
    let root = BitMapBackend::new(path, (cfg.width, cfg.height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let (x_min, x_max) = padded_range(xs.iter().copied());
    let (y_min, y_max) = padded_range(series.iter().flat_map(|s| s.values.iter().copied()));

    let mut chart = ChartBuilder::on(&root)
        .margin(cfg.margin)
        .caption(title, cfg.caption_font())
        .x_label_area_size(cfg.x_label_area)
        .y_label_area_size(cfg.y_label_area)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(render_err)?;

    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .disable_y_mesh()
        .x_desc(x_label)
        .axis_desc_style(cfg.label_font())
        .label_style(cfg.label_font());
    if let Some(y_label) = y_label {
        mesh.y_desc(y_label);
    }
    mesh.draw().map_err(render_err)?;

    let with_legend = series.len() > 1;
    let line_width = cfg.line_width;
    let dot_size = cfg.dot_size;

    for s in series {
        let points: Vec<(f64, f64)> =
            xs.iter().copied().zip(s.values.iter().copied()).collect();
        match s.style {
            LineStyle::Solid => {
                let anno = chart
                    .draw_series(LineSeries::new(points, BLACK.stroke_width(line_width)))
                    .map_err(render_err)?;
                if with_legend {
                    anno.label(s.label).legend(move |(x, y)| {
                        PathElement::new(
                            vec![(x, y), (x + 20, y)],
                            BLACK.stroke_width(line_width),
                        )
                    });
                }
            }
            LineStyle::Dashed => {
                let anno = chart
                    .draw_series(DashedLineSeries::new(
                        points,
                        8,
                        6,
                        BLACK.stroke_width(line_width),
                    ))
                    .map_err(render_err)?;
                if with_legend {
                    anno.label(s.label).legend(move |(x, y)| {
                        PathElement::new(
                            vec![(x, y), (x + 12, y)],
                            BLACK.stroke_width(line_width),
                        )
                    });
                }
            }
            LineStyle::Dotted => {
                let anno = chart
                    .draw_series(
                        points
                            .iter()
                            .map(|&p| Circle::new(p, dot_size, BLACK.filled())),
                    )
                    .map_err(render_err)?;
                if with_legend {
                    anno.label(s.label)
                        .legend(move |(x, y)| Circle::new((x + 10, y), dot_size, BLACK.filled()));
                }
            }
        }
    }

    if with_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font(cfg.label_font())
            .draw()
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

/// Orbit trace in the x-y plane with the force center marked at the origin
fn trajectory_plot(path: &Path, cfg: &PlotConfig, x: &[f64], y: &[f64]) -> Result<()> {
    let root = BitMapBackend::new(path, (cfg.width, cfg.height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    // The origin marker must always be in frame
    let (x_min, x_max) = padded_range(x.iter().copied().chain(std::iter::once(0.0)));
    let (y_min, y_max) = padded_range(y.iter().copied().chain(std::iter::once(0.0)));

    let mut chart = ChartBuilder::on(&root)
        .margin(cfg.margin)
        .caption("Trajectory", cfg.caption_font())
        .x_label_area_size(cfg.x_label_area)
        .y_label_area_size(cfg.y_label_area)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .label_style(cfg.label_font())
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(
            x.iter().copied().zip(y.iter().copied()),
            BLACK.stroke_width(cfg.line_width),
        ))
        .map_err(render_err)?;

    chart
        .draw_series(std::iter::once(Cross::new(
            (0.0, 0.0),
            cfg.marker_size,
            BLACK.stroke_width(cfg.line_width),
        )))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Data extent with a small padding; degenerate (flat) extents are widened so
/// the axis range is never empty
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return (-1.0, 1.0);
    }
    let pad = 0.05 * (max - min).abs().max(1e-9);
    (min - pad, max + pad)
}

fn render_err(e: impl std::fmt::Display) -> TwoBodyError {
    TwoBodyError::Render(e.to_string())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_padded_range_spans_data() {
        let (lo, hi) = padded_range([1.0, 3.0, 2.0].into_iter());
        assert!(lo < 1.0 && hi > 3.0);
    }

    #[test]
    fn test_padded_range_widens_flat_series() {
        let (lo, hi) = padded_range([2.5, 2.5, 2.5].into_iter());
        assert!(lo < hi);
    }

    #[test]
    fn test_padded_range_empty_input_is_finite() {
        let (lo, hi) = padded_range(std::iter::empty());
        assert!(lo.is_finite() && hi.is_finite() && lo < hi);
    }

    #[test]
    fn test_suffix_set_matches_output_contract() {
        assert_eq!(PLOT_SUFFIXES.len(), 9);
        assert!(PLOT_SUFFIXES.contains(&"trajectory"));
        assert!(PLOT_SUFFIXES.contains(&"all_vs_x"));
    }

    #[test]
    fn test_line_plot_writes_nonempty_png() {
        let dir = std::env::temp_dir().join(format!("two_body_plot_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("single.png");

        let xs = [0.0, 1.0, 2.0, 3.0];
        let values = [1.0, 0.5, 0.25, 0.125];
        let series = [Series {
            label: "r",
            values: &values,
            style: LineStyle::Solid,
        }];
        line_plot(
            &path,
            &PlotConfig::small(),
            "r v/s t",
            "Time",
            Some("r"),
            &xs,
            &series,
        )
        .unwrap();

        let meta = fs::metadata(&path).unwrap();
        assert!(meta.len() > 0);
        fs::remove_dir_all(&dir).ok();
    }
}
