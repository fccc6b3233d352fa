/// Batch run summary
use std::path::PathBuf;
use std::time::Duration;

use super::results::ResultRecord;

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// One record per input key, in input order
    pub records: Vec<ResultRecord>,
    /// Pauses taken between wallets, in order
    pub pauses: Vec<Duration>,
    pub results_path: Option<PathBuf>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.records.iter().filter(|r| r.status.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.records.len() - self.succeeded()
    }

    pub fn total_paused(&self) -> Duration {
        self.pauses.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::results::MintStatus;

    fn record(status: MintStatus) -> ResultRecord {
        ResultRecord {
            address: "0x0".to_string(),
            status,
            balance: None,
            tx_hash: None,
        }
    }

    #[test]
    fn test_counts() {
        let report = BatchReport {
            records: vec![
                record(MintStatus::Success),
                record(MintStatus::Failed("x".to_string())),
                record(MintStatus::Success),
            ],
            pauses: vec![Duration::from_secs(20), Duration::from_secs(25)],
            results_path: None,
        };

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.total_paused(), Duration::from_secs(45));
    }
}
