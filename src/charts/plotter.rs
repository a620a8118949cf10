//! Map Plotter Module
//! Loads one year of accidents, filters to a state and renders the scatter map.

use crate::charts::coords::{select_state, Accident};
use crate::charts::renderer::{MapStyle, StaticMapRenderer};
use crate::data::DataLoader;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// What a `map_state` call produced.
#[derive(Debug, Clone, PartialEq)]
pub enum MapOutcome {
    /// A PNG was written. `skipped` counts accidents with a missing coordinate.
    Plotted {
        path: PathBuf,
        points: usize,
        skipped: usize,
    },
    /// The state had no accidents; nothing was drawn.
    NoAccidents,
    /// Accidents exist but none has both coordinates; nothing was drawn.
    NoCoordinates { skipped: usize },
}

/// Renders per-state accident maps into `output_dir`.
pub struct MapPlotter {
    loader: DataLoader,
    output_dir: PathBuf,
    style: MapStyle,
}

impl MapPlotter {
    pub fn new(loader: DataLoader, output_dir: impl Into<PathBuf>, style: MapStyle) -> Self {
        Self {
            loader,
            output_dir: output_dir.into(),
            style,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File the map for `state` in `year` is written to.
    pub fn map_path(&self, state: i32, year: i32) -> PathBuf {
        self.output_dir.join(format!("map_{}_{}.png", state, year))
    }

    /// Plot every accident of `state` in `year`.
    #[instrument(skip(self))]
    pub fn map_state(&self, state: i32, year: i32) -> Result<MapOutcome> {
        let df = self.loader.read_year(year)?;
        let accidents = select_state(&df, state)?;
        self.plot_accidents(state, year, &accidents)
    }

    /// Render already-selected accidents; empty input is a no-op.
    pub fn plot_accidents(
        &self,
        state: i32,
        year: i32,
        accidents: &[Accident],
    ) -> Result<MapOutcome> {
        if accidents.is_empty() {
            info!(state, year, "no accidents to plot");
            return Ok(MapOutcome::NoAccidents);
        }

        let points: Vec<(f64, f64)> = accidents.iter().filter_map(Accident::position).collect();
        let skipped = accidents.len() - points.len();
        if points.is_empty() {
            info!(state, year, skipped, "no accident has known coordinates");
            return Ok(MapOutcome::NoCoordinates { skipped });
        }

        fs::create_dir_all(&self.output_dir)?;
        let path = self.map_path(state, year);
        let title = format!("Accidents in state {} ({})", state, year);
        StaticMapRenderer::render_png(&path, &title, &points, &self.style)?;

        info!(state, year, points = points.len(), skipped, path = %path.display(), "map written");
        Ok(MapOutcome::Plotted {
            path,
            points: points.len(),
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FarsError;
    use crate::test_support::{capture_logs, write_year, FixtureRow, TEST_LOGGING};
    use std::sync::LazyLock;

    fn style() -> MapStyle {
        MapStyle {
            width: 400,
            height: 300,
            point_size: 3,
            labels: false,
        }
    }

    fn plotter(data: &Path, out: &Path) -> MapPlotter {
        MapPlotter::new(DataLoader::new(data), out.join("maps"), style())
    }

    fn fixture(dir: &Path) {
        write_year(
            dir,
            2013,
            &[
                FixtureRow::new(1, 1, 32.5, -86.7),
                FixtureRow::new(1, 2, 33.1, -87.2),
                FixtureRow::new(1, 3, 99.9999, -86.0),
                FixtureRow::new(1, 4, 31.0, 999.9999),
                FixtureRow::new(6, 2, 36.7, -119.4),
                FixtureRow::new(10, 5, 99.9999, 999.9999),
            ],
        );
    }

    #[test]
    fn plots_state_and_skips_sentinel_coordinates() {
        LazyLock::force(&TEST_LOGGING);
        let data = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fixture(data.path());
        let plotter = plotter(data.path(), out.path());

        let outcome = plotter.map_state(1, 2013).unwrap();
        let expected = plotter.map_path(1, 2013);
        assert_eq!(
            outcome,
            MapOutcome::Plotted {
                path: expected.clone(),
                points: 2,
                skipped: 2,
            }
        );
        assert!(expected.is_file());
    }

    #[test]
    fn unknown_state_is_invalid() {
        let data = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fixture(data.path());
        let plotter = plotter(data.path(), out.path());

        assert!(matches!(
            plotter.map_state(99, 2013),
            Err(FarsError::InvalidState(99))
        ));
        assert!(!plotter.output_dir().exists());
    }

    #[test]
    fn missing_year_is_file_not_found() {
        let data = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let plotter = plotter(data.path(), out.path());

        assert!(matches!(
            plotter.map_state(1, 2016),
            Err(FarsError::FileNotFound { .. })
        ));
    }

    #[test]
    fn zero_accidents_draws_nothing() {
        let data = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let plotter = plotter(data.path(), out.path());

        let (outcome, logs) = capture_logs(|| plotter.plot_accidents(1, 2013, &[]));
        assert_eq!(outcome.unwrap(), MapOutcome::NoAccidents);
        assert!(!plotter.map_path(1, 2013).exists());
        assert!(
            logs.lines()
                .any(|l| l.contains("INFO") && l.contains("no accidents to plot")),
            "logs: {}",
            logs
        );
    }

    #[test]
    fn nearly_identical_coordinates_still_render() {
        let data = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(
            data.path().join(crate::make_filename(2013)),
            "STATE,MONTH,LATITUDE,LONGITUD\n1,1,32.0,-86.0\n1,2,32.000000000000007,-86.0\n",
        )
        .unwrap();
        let plotter = plotter(data.path(), out.path());

        let outcome = plotter.map_state(1, 2013).unwrap();
        assert!(matches!(outcome, MapOutcome::Plotted { points: 2, skipped: 0, .. }));
    }

    #[test]
    fn only_missing_coordinates_draws_nothing() {
        let data = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fixture(data.path());
        let plotter = plotter(data.path(), out.path());

        assert_eq!(
            plotter.map_state(10, 2013).unwrap(),
            MapOutcome::NoCoordinates { skipped: 1 }
        );
        assert!(!plotter.map_path(10, 2013).exists());
    }
}
