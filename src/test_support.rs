//! Fixture files for unit tests.

use bzip2::write::BzEncoder;
use bzip2::Compression;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

pub use crate::logging::TEST_LOGGING;

/// In-memory log sink shared between a subscriber and the test reading it.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

pub struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter(Arc::clone(&self.0))
    }
}

/// Run `f` with a thread-local subscriber and return its result plus the log text.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_ansi(false)
        .with_writer(capture.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, capture.contents())
}

/// One accident row; only the columns the crate reads plus a case id.
#[derive(Debug, Clone, Copy)]
pub struct FixtureRow {
    pub state: i32,
    pub month: i32,
    pub latitude: f64,
    pub longitude: f64,
}

impl FixtureRow {
    pub fn new(state: i32, month: i32, latitude: f64, longitude: f64) -> Self {
        Self {
            state,
            month,
            latitude,
            longitude,
        }
    }
}

fn to_csv(rows: &[FixtureRow]) -> String {
    let mut csv = String::from("STATE,ST_CASE,MONTH,LATITUDE,LONGITUD\n");
    for (i, row) in rows.iter().enumerate() {
        csv.push_str(&format!(
            "{},{},{},{:.4},{:.4}\n",
            row.state,
            row.state * 10_000 + i as i32,
            row.month,
            row.latitude,
            row.longitude
        ));
    }
    csv
}

/// Write `accident_<year>.csv.bz2` into `dir`.
pub fn write_year(dir: &Path, year: i32, rows: &[FixtureRow]) -> PathBuf {
    let path = dir.join(crate::make_filename(year));
    let file = File::create(&path).unwrap();
    let mut encoder = BzEncoder::new(file, Compression::default());
    encoder.write_all(to_csv(rows).as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

/// Write an uncompressed CSV named `name` into `dir`.
pub fn write_plain_year(dir: &Path, name: &str, rows: &[FixtureRow]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, to_csv(rows)).unwrap();
    path
}
