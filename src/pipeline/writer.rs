//! Single writer: drains the record channel into a gzip-compressed CSV file.

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use flate2::Compression;
use flate2::write::GzEncoder;
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::Record;
use crate::utils::config::OUTPUT_BUFFER_SIZE;

use super::Halt;

/// CSV rows (`repo,ts,stars`, no header) encoded through gzip into `W`.
pub struct CsvGzWriter<W: Write> {
    csv: csv::Writer<GzEncoder<W>>,
    rows: usize,
}

impl<W: Write> CsvGzWriter<W> {
    pub fn new(inner: W, level: u32) -> Self {
        let gz = GzEncoder::new(inner, Compression::new(level));
        let csv = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(gz);
        Self { csv, rows: 0 }
    }

    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        self.csv
            .write_record(record.fields())
            .context("write csv row")?;
        self.rows += 1;
        Ok(())
    }

    /// Flush the CSV buffer, then finish the gzip stream (trailer). Returns the inner writer
    /// and the row count. The inner writer is not flushed here.
    pub fn finish(mut self) -> Result<(W, usize)> {
        self.csv.flush().context("flush csv writer")?;
        let gz = self
            .csv
            .into_inner()
            .map_err(|e| anyhow::anyhow!("flush csv writer: {}", e.error()))?;
        let inner = gz.finish().context("finish gzip stream")?;
        Ok((inner, self.rows))
    }
}

/// Drain `record_rx` into a new file at `path`. Shutdown order matters: csv flush, gzip
/// trailer, buffered writer flush, file close.
pub fn write_records_to_file(record_rx: &Receiver<Record>, path: &Path, level: u32) -> Result<usize> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let buffered = BufWriter::with_capacity(OUTPUT_BUFFER_SIZE, file);
    let mut out = CsvGzWriter::new(buffered, level);

    while let Ok(record) = record_rx.recv() {
        out.write_record(&record)?;
    }

    let (buffered, rows) = out.finish()?;
    let file = buffered
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flush {}: {}", path.display(), e.error()))?;
    file.sync_all()
        .with_context(|| format!("sync {}", path.display()))?;
    drop(file);
    debug!("writer: {} rows to {}", rows, path.display());
    Ok(rows)
}

/// Spawn the writer thread. Errors go to the halt slot; the receiver is dropped on return, which
/// makes any reader still sending see a closed channel and stop.
pub fn spawn_writer_thread(
    record_rx: Receiver<Record>,
    path: PathBuf,
    level: u32,
    halt: &Arc<Halt>,
) -> JoinHandle<usize> {
    let halt = Arc::clone(halt);
    thread::spawn(move || match write_records_to_file(&record_rx, &path, level) {
        Ok(rows) => rows,
        Err(e) => {
            halt.fail(e);
            0
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn record(repo: &str, ts: &str, stars: &str) -> Record {
        Record {
            repo: repo.to_string(),
            ts: ts.to_string(),
            stars: stars.to_string(),
        }
    }

    fn gunzip(bytes: &[u8]) -> String {
        let mut s = String::new();
        GzDecoder::new(bytes).read_to_string(&mut s).unwrap();
        s
    }

    #[test]
    fn test_rows_written_verbatim() {
        let mut w = CsvGzWriter::new(Vec::new(), 6);
        w.write_record(&record("alpha", "100", "5")).unwrap();
        w.write_record(&record("beta", "0200", "7")).unwrap();
        let (bytes, rows) = w.finish().unwrap();
        assert_eq!(rows, 2);
        assert_eq!(gunzip(&bytes), "alpha,100,5\nbeta,0200,7\n");
    }

    #[test]
    fn test_empty_stream_is_valid_gzip() {
        let (bytes, rows) = CsvGzWriter::new(Vec::new(), 6).finish().unwrap();
        assert_eq!(rows, 0);
        assert!(!bytes.is_empty());
        assert_eq!(gunzip(&bytes), "");
    }

    #[test]
    fn test_repo_with_comma_is_quoted() {
        let mut w = CsvGzWriter::new(Vec::new(), 1);
        w.write_record(&record("a,b", "1", "2")).unwrap();
        let (bytes, _) = w.finish().unwrap();
        assert_eq!(gunzip(&bytes), "\"a,b\",1,2\n");
    }

    #[test]
    fn test_level_zero_still_gzip() {
        let mut w = CsvGzWriter::new(Vec::new(), 0);
        w.write_record(&record("x", "1", "1")).unwrap();
        let (bytes, _) = w.finish().unwrap();
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
        assert_eq!(gunzip(&bytes), "x,1,1\n");
    }

    #[test]
    fn test_write_records_to_file_drains_channel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv.gz");
        let (tx, rx) = crossbeam_channel::bounded(4);
        let producer = std::thread::spawn(move || {
            for i in 0..10 {
                tx.send(record("r", &i.to_string(), "1")).unwrap();
            }
        });
        let rows = write_records_to_file(&rx, &path, 6).unwrap();
        producer.join().unwrap();
        assert_eq!(rows, 10);
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(gunzip(&bytes).lines().count(), 10);
    }
}
