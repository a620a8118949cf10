//! Static Map Renderer
//! Draws accident locations over a longitude/latitude graticule with plotters.
//!
//! Layout:
//! 1. Optional caption and axis labels (need system fonts)
//! 2. Graticule lines at "nice" degree steps, framed by the plot border
//! 3. One filled circle per accident with known coordinates

use crate::error::{FarsError, Result};
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;

pub const MARKER_COLOR: RGBColor = RGBColor(231, 76, 60);
const GRID_COLOR: RGBColor = RGBColor(200, 200, 200);
const BORDER_COLOR: RGBColor = RGBColor(96, 125, 139);

/// Fraction of the coordinate span added on each side of the map.
const PAD_RATIO: f64 = 0.05;
/// Padding in degrees when every point shares one coordinate.
const DEGENERATE_PAD: f64 = 0.5;
/// Spans narrower than this (in degrees) count as a single coordinate.
const MIN_SPAN: f64 = 1e-6;
/// Upper bound on graticule lines per axis.
const MAX_TICKS: usize = 64;

/// Image settings for rendered maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStyle {
    pub width: u32,
    pub height: u32,
    pub point_size: u32,
    /// Draw caption and axis labels.
    pub labels: bool,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            point_size: 3,
            labels: true,
        }
    }
}

/// Longitude/latitude extent of a map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapBounds {
    pub longitude: Range<f64>,
    pub latitude: Range<f64>,
}

impl MapBounds {
    /// Padded extent of `(longitude, latitude)` points; `None` when empty.
    pub fn from_points(points: &[(f64, f64)]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (mut lon_min, mut lat_min) = *first;
        let (mut lon_max, mut lat_max) = *first;
        for &(lon, lat) in rest {
            lon_min = lon_min.min(lon);
            lon_max = lon_max.max(lon);
            lat_min = lat_min.min(lat);
            lat_max = lat_max.max(lat);
        }

        Some(Self {
            longitude: padded(lon_min, lon_max),
            latitude: padded(lat_min, lat_max),
        })
    }
}

fn padded(min: f64, max: f64) -> Range<f64> {
    let span = max - min;
    let pad = if span > MIN_SPAN {
        span * PAD_RATIO
    } else {
        DEGENERATE_PAD
    };
    (min - pad)..(max + pad)
}

fn render_error<E: std::fmt::Display>(err: E) -> FarsError {
    FarsError::Render(err.to_string())
}

pub struct StaticMapRenderer;

impl StaticMapRenderer {
    /// Render `points` as `(longitude, latitude)` markers into a PNG at `path`.
    pub fn render_png(
        path: &Path,
        title: &str,
        points: &[(f64, f64)],
        style: &MapStyle,
    ) -> Result<()> {
        let bounds = MapBounds::from_points(points).ok_or(FarsError::EmptyResult)?;

        let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let mut builder = ChartBuilder::on(&root);
        builder.margin(15);
        if style.labels {
            builder
                .caption(title, ("sans-serif", 20))
                .x_label_area_size(35)
                .y_label_area_size(50);
        }
        let mut chart = builder
            .build_cartesian_2d(bounds.longitude.clone(), bounds.latitude.clone())
            .map_err(render_error)?;

        if style.labels {
            chart
                .configure_mesh()
                .disable_mesh()
                .x_desc("Longitude")
                .y_desc("Latitude")
                .draw()
                .map_err(render_error)?;
        }

        chart
            .draw_series(
                Self::graticule(&bounds)
                    .into_iter()
                    .map(|line| PathElement::new(line, GRID_COLOR.stroke_width(1))),
            )
            .map_err(render_error)?;

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [
                    (bounds.longitude.start, bounds.latitude.start),
                    (bounds.longitude.end, bounds.latitude.end),
                ],
                BORDER_COLOR.stroke_width(1),
            )))
            .map_err(render_error)?;

        chart
            .draw_series(
                points
                    .iter()
                    .map(|&point| Circle::new(point, style.point_size, MARKER_COLOR.filled())),
            )
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
        Ok(())
    }

    /// Meridians and parallels at round degree steps inside `bounds`.
    fn graticule(bounds: &MapBounds) -> Vec<Vec<(f64, f64)>> {
        let lon = &bounds.longitude;
        let lat = &bounds.latitude;

        let meridians = Self::ticks(lon)
            .into_iter()
            .map(|x| vec![(x, lat.start), (x, lat.end)]);
        let parallels = Self::ticks(lat)
            .into_iter()
            .map(|y| vec![(lon.start, y), (lon.end, y)]);

        meridians.chain(parallels).collect()
    }

    fn ticks(range: &Range<f64>) -> Vec<f64> {
        let step = Self::nice_step(range.end - range.start, 6);
        if !step.is_finite() || step <= 0.0 {
            return Vec::new();
        }
        let first = (range.start / step).ceil() * step;
        if first > range.end {
            return Vec::new();
        }
        let count = (((range.end - first) / step).floor() as usize).min(MAX_TICKS - 1);
        (0..=count).map(|i| first + i as f64 * step).collect()
    }

    fn nice_step(range: f64, target_steps: usize) -> f64 {
        let raw_step = range / target_steps as f64;
        let magnitude = 10f64.powf(raw_step.log10().floor());
        let normalized = raw_step / magnitude;

        let nice = if normalized <= 1.0 {
            1.0
        } else if normalized <= 2.0 {
            2.0
        } else if normalized <= 5.0 {
            5.0
        } else {
            10.0
        };

        nice * magnitude
    }
}
