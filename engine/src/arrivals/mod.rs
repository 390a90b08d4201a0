//! Arrival records: the boundary to whatever produces passenger traffic.
//!
//! The core does not generate arrivals; it consumes an iterable of
//! `(arrival_time, origin, destination)` records and schedules each as a
//! `Queued` transition at its arrival time. Records are interchanged as
//! delimited rows with an `arrival_time,origin,destination` header, so a
//! schedule can be saved once and replayed across policies.
//!
//! Validation against the building (unknown labels, origin equal to
//! destination) happens when records are admitted into a simulation, not
//! here.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One passenger arrival.
///
/// `arrival_time` is in float seconds since midnight of day zero; times past
/// 86,400 roll into later days. Floor labels are opaque strings resolved
/// against the building at admission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalRecord {
    pub arrival_time: f64,
    pub origin: String,
    pub destination: String,
}

/// Errors at the arrival-record boundary.
#[derive(Debug, Error)]
pub enum ArrivalError {
    #[error("failed to read or write arrival records: {0}")]
    Csv(#[from] csv::Error),

    #[error("arrival record i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Read all records from a delimited source with a header row.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<ArrivalRecord>, ArrivalError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// Read all records from a file path.
pub fn read_records_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ArrivalRecord>, ArrivalError> {
    read_records(File::open(path)?)
}

/// Write records as delimited rows with a header.
pub fn write_records<W: Write>(writer: W, records: &[ArrivalRecord]) -> Result<(), ArrivalError> {
    let mut writer = csv::Writer::from_writer(writer);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write records to a file path.
pub fn write_records_to_path<P: AsRef<Path>>(
    path: P,
    records: &[ArrivalRecord],
) -> Result<(), ArrivalError> {
    write_records(File::create(path)?, records)
}
