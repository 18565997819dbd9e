//! Saved-fleet files: one comma-separated line per vehicle, no header.
//!
//! Loading is line-tolerant. A line that cannot be decoded is logged and
//! skipped, and the rest of the file still loads. Failing to read the file
//! itself aborts the load.

mod record;

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::Vehicle;

pub use record::{decode, encode, RecordError};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl StorageError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A line that was left out of a load.
#[derive(Debug)]
pub struct SkippedLine {
    /// 1-based line number in the source file.
    pub line: u64,
    pub reason: RecordError,
}

#[derive(Debug, Default)]
pub struct LoadSummary {
    pub loaded: usize,
    pub skipped: Vec<SkippedLine>,
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::None);
    builder
}

fn writer_builder() -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder.has_headers(false).flexible(true);
    builder
}

/// Write every vehicle as one record, in fleet order.
pub fn write_fleet<W: Write>(vehicles: &[Vehicle], writer: W) -> Result<(), StorageError> {
    let mut csv_writer = writer_builder().from_writer(writer);
    for vehicle in vehicles {
        csv_writer.write_record(encode(vehicle))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Decode every readable record. Bad lines are reported, not fatal; an I/O
/// error from `reader` is.
///
/// IDs must be unique across the file; later duplicates are skipped.
pub fn read_fleet<R: Read>(reader: R) -> Result<(Vec<Vehicle>, LoadSummary), StorageError> {
    let mut csv_reader = reader_builder().from_reader(reader);
    let mut vehicles = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut summary = LoadSummary::default();

    for (index, result) in csv_reader.records().enumerate() {
        let fallback_line = index as u64 + 1;
        let decoded = match result {
            Ok(record) => {
                let line = record.position().map_or(fallback_line, |p| p.line());
                (line, decode(&record))
            }
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                let line = e.position().map_or(fallback_line, |p| p.line());
                tracing::warn!(line, "unreadable line skipped: {}", e);
                summary.skipped.push(SkippedLine {
                    line,
                    reason: RecordError::Unreadable(e.to_string()),
                });
                continue;
            }
        };

        match decoded {
            (line, Ok(vehicle)) => {
                if !seen_ids.insert(vehicle.id().to_string()) {
                    tracing::warn!(line, id = vehicle.id(), "duplicate vehicle ID skipped");
                    summary.skipped.push(SkippedLine {
                        line,
                        reason: RecordError::DuplicateId(vehicle.id().to_string()),
                    });
                    continue;
                }
                vehicles.push(vehicle);
            }
            (line, Err(reason)) => {
                tracing::warn!(line, "failed to parse line: {}", reason);
                summary.skipped.push(SkippedLine { line, reason });
            }
        }
    }

    summary.loaded = vehicles.len();
    Ok((vehicles, summary))
}

/// Save to `path`, creating parent directories as needed.
///
/// The records go to a sibling temporary file that is renamed over `path`
/// once fully written, so a failed save leaves any previous file intact.
pub fn save_fleet(vehicles: &[Vehicle], path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
    }

    let tmp_path = temporary_path(path);
    let file = File::create(&tmp_path).map_err(|e| StorageError::io(&tmp_path, e))?;
    if let Err(e) = write_fleet(vehicles, file) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    fs::rename(&tmp_path, path).map_err(|e| StorageError::io(path, e))?;

    tracing::info!(path = %path.display(), count = vehicles.len(), "fleet saved");
    Ok(())
}

pub fn load_fleet(path: &Path) -> Result<(Vec<Vehicle>, LoadSummary), StorageError> {
    let file = File::open(path).map_err(|e| StorageError::io(path, e))?;
    let (vehicles, summary) = read_fleet(file)?;
    tracing::info!(
        path = %path.display(),
        loaded = summary.loaded,
        skipped = summary.skipped.len(),
        "fleet loaded"
    );
    Ok((vehicles, summary))
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "fleet".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Car, FuelConsumable};

    #[test]
    fn test_read_skips_bad_lines_and_keeps_the_rest() {
        let input = "\
Car,C1,Toyota,120.0,4,10.0,5,1,0.0
Zeppelin,Z1,Hindenburg,130.0
Car,C2,Honda,110.0,four,0.0,5,0,0.0

CargoShip,S1,Maersk,50.0,0.0,true,50000.0,0.0,12.0
Car,C1,Dup,100.0,4,0.0,5,0,0.0
";
        let (vehicles, summary) = read_fleet(input.as_bytes()).unwrap();

        let ids: Vec<_> = vehicles.iter().map(|v| v.id()).collect();
        assert_eq!(ids, vec!["C1", "S1"]);
        assert_eq!(summary.loaded, 2);
        assert_eq!(summary.skipped.len(), 3);
        assert!(matches!(summary.skipped[0].reason, RecordError::UnknownType(_)));
        assert_eq!(summary.skipped[0].line, 2);
        assert!(matches!(
            summary.skipped[2].reason,
            RecordError::DuplicateId(_)
        ));
    }

    #[test]
    fn test_model_with_comma_is_quoted() {
        let car = Car::new("C1", "Model S, Long Range", 200.0, 4).unwrap();
        let mut out = Vec::new();
        write_fleet(&[Vehicle::from(car)], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Car,C1,\"Model S, Long Range\",200.0,4,0.0,5,0,0.0\n");

        let (vehicles, summary) = read_fleet(text.as_bytes()).unwrap();
        assert!(summary.skipped.is_empty());
        assert_eq!(vehicles[0].model(), "Model S, Long Range");
    }

    #[test]
    fn test_model_keeps_surrounding_spaces() {
        let car = Car::new("C1", " Roadster ", 200.0, 4).unwrap();
        let mut out = Vec::new();
        write_fleet(&[Vehicle::from(car)], &mut out).unwrap();

        let (vehicles, _) = read_fleet(out.as_slice()).unwrap();
        assert_eq!(vehicles[0].model(), " Roadster ");
    }

    #[test]
    fn test_numeric_columns_tolerate_padding() {
        let (vehicles, summary) =
            read_fleet("Car,C1,Fiat, 90.0 ,4, 5.0,5, 1 ,0.0\n".as_bytes()).unwrap();
        assert!(summary.skipped.is_empty());
        assert_eq!(vehicles[0].max_speed(), 90.0);
        assert_eq!(vehicles[0].id(), "C1");
    }

    #[test]
    fn test_read_error_aborts_the_load() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk gone"))
            }
        }
        assert!(matches!(read_fleet(Broken), Err(StorageError::Csv(_))));
    }

    #[test]
    fn test_sail_ship_fuel_column_is_not_replayed() {
        let (vehicles, summary) =
            read_fleet("CargoShip,S1,Maersk,50.0,40.0,true,50000.0,100.0,0.0\n".as_bytes())
                .unwrap();
        assert!(summary.skipped.is_empty());
        let Vehicle::CargoShip(ship) = &vehicles[0] else {
            panic!("expected a ship");
        };
        assert_eq!(ship.fuel_level(), 0.0);
    }
}
