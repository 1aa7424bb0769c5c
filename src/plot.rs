//! Chart rendering for the plot front-ends
//!
//! Line charts for tabulated force/energy sections, quiver fields for 2D
//! velocity bins, and voxel grids for 3D chunk data, all drawn with plotters
//! onto PNG backends.

use crate::colormap::Colormap;
use crate::errors::{AvePostError, Result};
use crate::series::{rebuild_energy, ChunkGrid, ForceTable, VelocityBin};
use plotters::prelude::*;
use std::fmt::Debug;
use std::path::Path;

/// Boltzmann constant in kcal/mol/K, for kBT-scaled energy axes.
pub const KB_KCAL_MOL_K: f64 = 0.001985875;

const FORCE_CANVAS: (u32, u32) = (900, 900);
const QUIVER_WIDTH: u32 = 1280;
const VOXEL_CANVAS: (u32, u32) = (800, 800);

/// An `lo:hi` axis override from the command line.
#[derive(Debug, Clone, Copy)]
pub struct AxisRange {
    pub lo: f64,
    pub hi: f64,
}

impl AxisRange {
    /// Parses `lo:hi` (negative bounds allowed, e.g. `-3:10`).
    pub fn parse(spec: &str) -> std::result::Result<Self, String> {
        let mut parts = spec.splitn(2, ':');
        let lo = parts
            .next()
            .unwrap_or("")
            .parse::<f64>()
            .map_err(|_| format!("Invalid axis range '{}': expected lo:hi", spec))?;
        let hi = parts
            .next()
            .ok_or_else(|| format!("Invalid axis range '{}': expected lo:hi", spec))?
            .parse::<f64>()
            .map_err(|_| format!("Invalid axis range '{}': expected lo:hi", spec))?;
        if hi <= lo {
            return Err(format!("Empty axis range '{}'", spec));
        }
        Ok(Self { lo, hi })
    }
}

/// Options for the force-table chart.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForcePlotOptions {
    pub xrange: Option<AxisRange>,
    pub yrange: Option<AxisRange>,
    /// Temperature in K; when set, energies are drawn in units of kBT.
    pub temperature: Option<f64>,
    /// Also overlay the energy curve rebuilt from the tabulated force.
    pub rebuilt_energy: bool,
}

fn chart_err<E: Debug>(error: E) -> AvePostError {
    AvePostError::PlotError(format!("{:?}", error))
}

/// Draws every table section as energy (top) and force (bottom) line charts.
pub fn plot_force_tables(
    tables: &[ForceTable],
    options: &ForcePlotOptions,
    path: &Path,
) -> Result<()> {
    if tables.is_empty() {
        return Err(AvePostError::NoRecords);
    }

    let energy_scale = match options.temperature {
        Some(temp) if temp > 0.0 => 1.0 / (KB_KCAL_MOL_K * temp),
        _ => 1.0,
    };
    let energy_label = if energy_scale != 1.0 {
        "energy (kBT)"
    } else {
        "energy (kcal/mol)"
    };

    let xrange = options.xrange.unwrap_or_else(|| {
        data_range(tables.iter().flat_map(|t| t.r.iter().copied()))
    });
    let yrange = options.yrange.unwrap_or_else(|| {
        data_range(
            tables
                .iter()
                .flat_map(|t| t.energy.iter().map(|e| e * energy_scale)),
        )
    });
    let force_range = data_range(tables.iter().flat_map(|t| t.force.iter().copied()));

    let root = BitMapBackend::new(path, FORCE_CANVAS).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;
    let (energy_area, force_area) = root.split_vertically((FORCE_CANVAS.1 / 2) as i32);
    let palette = Colormap::by_name("viridis")?;
    let table_color = |idx: usize| {
        let t = if tables.len() > 1 {
            idx as f64 / (tables.len() - 1) as f64
        } else {
            0.0
        };
        palette.sample(0.9 * t)
    };

    // Energy chart.
    {
        let mut chart = ChartBuilder::on(&energy_area)
            .margin(12)
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .caption("Tabulated energies", ("sans-serif", 24))
            .build_cartesian_2d(xrange.lo..xrange.hi, yrange.lo..yrange.hi)
            .map_err(chart_err)?;
        chart
            .configure_mesh()
            .x_desc("r")
            .y_desc(energy_label)
            .label_style(("sans-serif", 16))
            .draw()
            .map_err(chart_err)?;

        for (idx, table) in tables.iter().enumerate() {
            let color = table_color(idx);
            chart
                .draw_series(LineSeries::new(
                    table
                        .r
                        .iter()
                        .zip(&table.energy)
                        .map(|(&r, &e)| (r, e * energy_scale)),
                    &color,
                ))
                .map_err(chart_err)?
                .label(table.keyword.clone())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], color)
                });

            if options.rebuilt_energy {
                let rebuilt = rebuild_energy(table);
                chart
                    .draw_series(LineSeries::new(
                        table
                            .r
                            .iter()
                            .zip(&rebuilt)
                            .map(|(&r, &e)| (r, e * energy_scale)),
                        color.mix(0.4),
                    ))
                    .map_err(chart_err)?;
            }
        }
        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.8))
            .draw()
            .map_err(chart_err)?;
    }

    // Force chart.
    {
        let mut chart = ChartBuilder::on(&force_area)
            .margin(12)
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .caption("Tabulated forces", ("sans-serif", 24))
            .build_cartesian_2d(xrange.lo..xrange.hi, force_range.lo..force_range.hi)
            .map_err(chart_err)?;
        chart
            .configure_mesh()
            .x_desc("r")
            .y_desc("force (kcal/mol/A)")
            .label_style(("sans-serif", 16))
            .draw()
            .map_err(chart_err)?;

        for (idx, table) in tables.iter().enumerate() {
            let color = table_color(idx);
            chart
                .draw_series(LineSeries::new(
                    table.r.iter().zip(&table.force).map(|(&r, &f)| (r, f)),
                    &color,
                ))
                .map_err(chart_err)?;
        }
    }

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Draws the averaged velocity field as arrows colored by temperature.
pub fn plot_quiver(
    bins: &[VelocityBin],
    lx: f64,
    ly: f64,
    colormap: &Colormap,
    path: &Path,
) -> Result<()> {
    let occupied: Vec<&VelocityBin> = bins.iter().filter(|b| b.atoms > 0.0).collect();
    if occupied.is_empty() {
        return Err(AvePostError::NoRecords);
    }

    let vmax = occupied
        .iter()
        .map(|b| (b.vx * b.vx + b.vy * b.vy).sqrt())
        .fold(0.0f64, f64::max);
    let temps = data_range(occupied.iter().map(|b| b.temp));

    // Arrows sized to roughly one bin spacing at the fastest bin.
    let spacing = lx / (occupied.len() as f64).sqrt().max(1.0);
    let scale = if vmax > 0.0 { spacing / vmax } else { 1.0 };

    let ratio = (ly / lx).clamp(0.05, 2.0);
    let canvas = (QUIVER_WIDTH, (QUIVER_WIDTH as f64 * ratio).ceil() as u32);
    let root = BitMapBackend::new(path, canvas).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(12)
        .set_label_area_size(LabelAreaPosition::Left, 50)
        .set_label_area_size(LabelAreaPosition::Bottom, 35)
        .build_cartesian_2d(0.0..lx, 0.0..ly)
        .map_err(chart_err)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("x")
        .y_desc("y")
        .label_style(("sans-serif", 14))
        .draw()
        .map_err(chart_err)?;

    for bin in &occupied {
        let x = bin.x * lx;
        let y = bin.y * ly;
        let tip = (x + bin.vx * scale, y + bin.vy * scale);
        let color = colormap.color_for(bin.temp, temps.lo, temps.hi);
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(x, y), tip],
                color.stroke_width(2),
            )))
            .map_err(chart_err)?;
        chart
            .draw_series(std::iter::once(Circle::new(tip, 2, color.filled())))
            .map_err(chart_err)?;
    }

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Draws one field of a 3D chunk grid as a voxel chart.
///
/// Bins whose average atom count is below `threshold` are hidden. Values are
/// laid out with the third coordinate varying fastest, matching the row order
/// of 3D `ave/chunk` output.
pub fn plot_voxels(
    grid: &ChunkGrid,
    field: &str,
    threshold: f64,
    colormap: &Colormap,
    path: &Path,
) -> Result<()> {
    let dims = grid.grid_dims();
    if dims.len() != 3 {
        return Err(AvePostError::Generic(format!(
            "Expected a 3D binned file, found {} coordinate column(s)",
            dims.len()
        )));
    }
    let (nx, ny, nz) = (dims[0], dims[1], dims[2]);

    let values = grid
        .column(field)
        .ok_or_else(|| AvePostError::Generic(format!("Field '{}' not found in file", field)))?;
    let natoms = grid
        .column("Ncount")
        .ok_or_else(|| AvePostError::Generic("Field 'Ncount' not found in file".to_string()))?;
    let range = data_range(values.iter().copied());

    let root = BitMapBackend::new(path, VOXEL_CANVAS).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(16)
        .caption(field, ("sans-serif", 24))
        .build_cartesian_3d(0.0..nx as f64, 0.0..ny as f64, 0.0..nz as f64)
        .map_err(chart_err)?;
    chart.configure_axes().draw().map_err(chart_err)?;

    for (idx, (&value, &atoms)) in values.iter().zip(natoms).enumerate() {
        if atoms < threshold {
            continue;
        }
        let z = idx % nz;
        let y = (idx / nz) % ny;
        let x = idx / (nz * ny);
        if x >= nx {
            break;
        }
        let color = colormap.color_for(value, range.lo, range.hi);
        chart
            .draw_series(std::iter::once(Cubiod::new(
                [
                    (x as f64, y as f64, z as f64),
                    (x as f64 + 1.0, y as f64 + 1.0, z as f64 + 1.0),
                ],
                color.mix(0.85),
                BLACK.mix(0.25),
            )))
            .map_err(chart_err)?;
    }

    root.present().map_err(chart_err)?;
    Ok(())
}

fn data_range(values: impl Iterator<Item = f64>) -> AxisRange {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values {
        if v.is_finite() {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return AxisRange { lo: 0.0, hi: 1.0 };
    }
    if hi - lo < 1e-12 {
        let pad = lo.abs().max(1.0) * 0.05;
        return AxisRange {
            lo: lo - pad,
            hi: hi + pad,
        };
    }
    let pad = (hi - lo) * 0.05;
    AxisRange {
        lo: lo - pad,
        hi: hi + pad,
    }
}
