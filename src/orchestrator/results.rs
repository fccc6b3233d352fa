/// Pipe-delimited results file, one row per wallet
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use alloy_primitives::U256;
use chrono::{DateTime, Local};

use crate::chain::units::format_native;

pub const RESULTS_HEADER: &str = "Address | Status | Balance | TX Hash";

/// Address column for a key that could not be parsed
pub const INVALID_KEY_LABEL: &str = "invalid-key";

/// Outcome of one wallet's mint attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintStatus {
    Success,
    Failed(String),
}

impl MintStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, MintStatus::Success)
    }
}

impl fmt::Display for MintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MintStatus::Success => write!(f, "Success"),
            MintStatus::Failed(reason) => write!(f, "Error: {}", reason),
        }
    }
}

/// One row of the results file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub address: String,
    pub status: MintStatus,
    /// Post-attempt balance; None when it could not be read
    pub balance: Option<U256>,
    pub tx_hash: Option<String>,
}

impl ResultRecord {
    pub fn to_line(&self, symbol: &str) -> String {
        let balance = match &self.balance {
            Some(balance) => format!("{} {}", format_native(balance, 6), symbol),
            None => "unknown".to_string(),
        };
        format!(
            "{} | {} | {} | {}",
            self.address,
            sanitize_cell(&self.status.to_string()),
            balance,
            self.tx_hash.as_deref().unwrap_or("")
        )
    }
}

/// Keep a cell on one line and free of column separators
fn sanitize_cell(text: &str) -> String {
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "/")
}

/// `mint_results_<YYYYMMDD_HHMMSS>.txt`
pub fn results_file_name(timestamp: &DateTime<Local>) -> String {
    format!("mint_results_{}.txt", timestamp.format("%Y%m%d_%H%M%S"))
}

/// Appends result rows, flushing after every write
pub struct ResultWriter<W: Write> {
    out: W,
    symbol: String,
    rows: usize,
}

impl ResultWriter<BufWriter<File>> {
    /// Create a timestamped results file in `dir` and write the header
    pub fn create_in(dir: &Path, symbol: &str, timestamp: &DateTime<Local>) -> io::Result<(Self, PathBuf)> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(results_file_name(timestamp));
        let file = File::create(&path)?;
        let writer = Self::new(BufWriter::new(file), symbol)?;
        Ok((writer, path))
    }
}

impl<W: Write> ResultWriter<W> {
    pub fn new(mut out: W, symbol: &str) -> io::Result<Self> {
        writeln!(out, "{}", RESULTS_HEADER)?;
        out.flush()?;
        Ok(Self {
            out,
            symbol: symbol.to_string(),
            rows: 0,
        })
    }

    pub fn append(&mut self, record: &ResultRecord) -> io::Result<()> {
        writeln!(self.out, "{}", record.to_line(&self.symbol))?;
        self.out.flush()?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn success_record() -> ResultRecord {
        ResultRecord {
            address: "0x9d8A62f656a8d1615C1294fd71e9CFb3E4855A4F".to_string(),
            status: MintStatus::Success,
            balance: Some(U256::from(1_500_000_000_000_000_000u64)),
            tx_hash: Some("0xabc123".to_string()),
        }
    }

    #[test]
    fn test_file_name_format() {
        let timestamp = Local.with_ymd_and_hms(2025, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(results_file_name(&timestamp), "mint_results_20250307_090501.txt");
    }

    #[test]
    fn test_header_written_without_rows() {
        let writer = ResultWriter::new(Vec::new(), "MON").unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text, format!("{}\n", RESULTS_HEADER));
    }

    #[test]
    fn test_row_format() {
        let mut writer = ResultWriter::new(Vec::new(), "MON").unwrap();
        writer.append(&success_record()).unwrap();

        let failed = ResultRecord {
            address: INVALID_KEY_LABEL.to_string(),
            status: MintStatus::Failed("rpc: boom | retry\nlater".to_string()),
            balance: None,
            tx_hash: None,
        };
        writer.append(&failed).unwrap();
        assert_eq!(writer.rows(), 2);

        let text = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "0x9d8A62f656a8d1615C1294fd71e9CFb3E4855A4F | Success | 1.500000 MON | 0xabc123"
        );
        assert_eq!(lines[2], "invalid-key | Error: rpc: boom / retry later | unknown | ");
    }

    #[test]
    fn test_create_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        let timestamp = Local.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();

        let (mut writer, path) = ResultWriter::create_in(dir.path(), "MON", &timestamp).unwrap();
        writer.append(&success_record()).unwrap();
        drop(writer);

        assert_eq!(path, dir.path().join("mint_results_20250102_030405.txt"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(RESULTS_HEADER));
        assert_eq!(text.lines().count(), 2);
    }
}
