// src/storage/mod.rs
use crate::extractors::record::Record;
use crate::utils::error::OutputError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Line format of emitted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// 16 comma-delimited fields per line, no header row
    Csv,
    /// One JSON object per line
    Json,
}

pub struct RecordWriter {
    format: OutputFormat,
}

impl RecordWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Writes all records, one per line, in input order. Returns the number written.
    pub fn write_records<W: Write>(&self, records: &[Record], mut out: W) -> Result<usize, OutputError> {
        match self.format {
            OutputFormat::Csv => {
                let mut wtr = csv::WriterBuilder::new()
                    .has_headers(false)
                    .terminator(csv::Terminator::Any(b'\n'))
                    .from_writer(out);
                for record in records {
                    wtr.write_record(record.fields())?;
                }
                wtr.flush()?;
            }
            OutputFormat::Json => {
                for record in records {
                    serde_json::to_writer(&mut out, record)?;
                    out.write_all(b"\n")?;
                }
                out.flush()?;
            }
        }

        tracing::debug!("Wrote {} records as {:?}", records.len(), self.format);
        Ok(records.len())
    }

    /// Writes all records to `path`, creating parent directories as needed.
    pub fn save_records(&self, records: &[Record], path: &Path) -> Result<PathBuf, OutputError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = fs::File::create(path)?;
        self.write_records(records, std::io::BufWriter::new(file))?;

        tracing::info!("Saved {} records to {}", records.len(), path.display());
        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(symbol: &str) -> Record {
        Record {
            settlement_time: "12/15/10 06:00 PM".to_string(),
            symbol: symbol.to_string(),
            indicator: "F".to_string(),
            exp_month: "1".to_string(),
            exp_day: "0".to_string(),
            exp_year: "11".to_string(),
            strike: "0".to_string(),
            open: "100".to_string(),
            high: "105".to_string(),
            low: "98".to_string(),
            last: "102".to_string(),
            settle: "101".to_string(),
            est_volume: "50".to_string(),
            prior_settle: "100".to_string(),
            prior_volume: "20".to_string(),
            prior_open_interest: "5".to_string(),
        }
    }

    #[test]
    fn test_csv_lines() {
        let mut buf = Vec::new();
        let n = RecordWriter::new(OutputFormat::Csv)
            .write_records(&[sample("SOYBEAN OIL FUTURES"), sample("CORN FUTURES")], &mut buf)
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "12/15/10 06:00 PM,SOYBEAN OIL FUTURES,F,1,0,11,0,100,105,98,102,101,50,100,20,5\n\
             12/15/10 06:00 PM,CORN FUTURES,F,1,0,11,0,100,105,98,102,101,50,100,20,5\n"
        );
    }

    #[test]
    fn test_csv_quotes_embedded_commas() {
        let mut buf = Vec::new();
        RecordWriter::new(OutputFormat::Csv)
            .write_records(&[sample("WHEAT, HARD RED")], &mut buf)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("12/15/10 06:00 PM,\"WHEAT, HARD RED\",F,"));
    }

    #[test]
    fn test_json_lines() {
        let mut buf = Vec::new();
        RecordWriter::new(OutputFormat::Json)
            .write_records(&[sample("SOYBEAN OIL FUTURES")], &mut buf)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(value["symbol"], "SOYBEAN OIL FUTURES");
        assert_eq!(value["prior_open_interest"], "5");
    }

    #[test]
    fn test_save_records_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("stlags.csv");
        let saved = RecordWriter::new(OutputFormat::Csv)
            .save_records(&[sample("SOYBEAN OIL FUTURES")], &path)
            .unwrap();
        assert_eq!(saved, path);
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.ends_with(",20,5\n"));
    }
}
