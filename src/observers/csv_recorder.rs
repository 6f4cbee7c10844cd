use crate::core::snapshot::{ShiftObserver, TickSnapshot};
use crate::core::types::StationId;
use log::warn;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes one CSV row per tick.
///
/// Columns: `Time`, then `<Station>_Produced, <Station>_Resource` for each
/// station in line order, then `Kanban_<Station>` for each station. Cards
/// are written as 0/1 and an unbounded feed as `inf`.
///
/// A write failure is logged once and disables the recorder; the
/// simulation keeps running. The error is returned by [`CsvRecorder::finish`].
pub struct CsvRecorder<W: Write = BufWriter<File>> {
    writer: W,
    rows: u64,
    error: Option<io::Error>,
}

impl CsvRecorder<BufWriter<File>> {
    /// Truncate or create `path` and write the header row
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path.as_ref())?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> CsvRecorder<W> {
    pub fn new(mut writer: W) -> io::Result<Self> {
        writeln!(writer, "{}", Self::header())?;
        Ok(Self {
            writer,
            rows: 0,
            error: None,
        })
    }

    pub fn header() -> String {
        let mut columns = vec!["Time".to_string()];
        for id in StationId::ALL {
            columns.push(format!("{}_Produced", id.label()));
            columns.push(format!("{}_Resource", id.label()));
        }
        for id in StationId::ALL {
            columns.push(format!("Kanban_{}", id.label()));
        }
        columns.join(",")
    }

    pub fn format_row(snapshot: &TickSnapshot) -> String {
        let mut fields = vec![snapshot.elapsed.to_string()];
        for station in &snapshot.stations {
            fields.push(station.produced_stock.to_string());
            fields.push(station.resource_stock.to_string());
        }
        for station in &snapshot.stations {
            fields.push(u8::from(station.kanban_card).to_string());
        }
        fields.join(",")
    }

    /// Data rows written so far
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush and hand back the writer, or the first write error
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> ShiftObserver for CsvRecorder<W> {
    fn on_tick(&mut self, snapshot: &TickSnapshot) {
        if self.error.is_some() {
            return;
        }
        match writeln!(self.writer, "{}", Self::format_row(snapshot)) {
            Ok(()) => self.rows += 1,
            Err(err) => {
                warn!("CSV export disabled after write failure: {}", err);
                self.error = Some(err);
            }
        }
    }
}

/// Default export location used by the demo binary
pub fn default_export_path() -> PathBuf {
    PathBuf::from("simulation_results.csv")
}
