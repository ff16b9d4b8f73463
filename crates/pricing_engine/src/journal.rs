//! Append-only calculation journal.
//!
//! The engine's only outward handoff: a sink that receives each computed
//! calculation record. `CalcJournal` writes JSONL, one file per UTC day,
//! assigning each entry an opaque id. Writes are best-effort: a failed
//! append is logged and never fails the computation path.

use std::fs::{create_dir_all, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::assembler::Calculation;

/// Receives computed calculation records.
pub trait ResultSink {
    fn record(&mut self, calc: &Calculation);
}

pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// JSONL journal with daily file rotation.
pub struct CalcJournal {
    dir: PathBuf,
    day_key: String,
    file: File,
}

impl CalcJournal {
    pub fn open(dir: PathBuf) -> std::io::Result<Self> {
        create_dir_all(&dir)?;
        let day_key = Utc::now().format("%Y-%m-%d").to_string();
        let file = Self::open_day_file(&dir, &day_key)?;
        Ok(Self { dir, day_key, file })
    }

    fn open_day_file(dir: &Path, day_key: &str) -> std::io::Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(format!("calculations-{}.jsonl", day_key)))
    }

    fn rotate_if_needed(&mut self) -> std::io::Result<()> {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        if today != self.day_key {
            self.file = Self::open_day_file(&self.dir, &today)?;
            self.day_key = today;
        }
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ResultSink for CalcJournal {
    fn record(&mut self, calc: &Calculation) {
        let entry = json!({
            "id": Uuid::new_v4().to_string(),
            "recorded_at": now_iso(),
            "calculation": calc,
        });
        let result = (|| -> std::io::Result<()> {
            self.rotate_if_needed()?;
            let line = serde_json::to_string(&entry).unwrap_or_else(|_| "{}".to_string());
            writeln!(self.file, "{}", line)?;
            self.file.flush()?;
            Ok(())
        })();

        if let Err(e) = result {
            tracing::warn!("journal write failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::assemble;
    use common::{CostInputs, Marketplace, PricingGoal, VariablePercents};

    #[test]
    fn test_journal_appends_one_line_per_record() {
        let dir = std::env::temp_dir().join(format!(
            "calc-journal-test-{}-{}",
            std::process::id(),
            Uuid::new_v4()
        ));
        let mut journal = CalcJournal::open(dir.clone()).unwrap();

        let calc = assemble(
            CostInputs {
                product_cost: 10.0,
                fixed_overhead: 0.0,
                shipping_cost: Some(5.0),
                platform_fixed_fee: 4.0,
                fees: VariablePercents {
                    commission: 14.0,
                    ..Default::default()
                },
                weight_grams: None,
                dimensions: None,
            },
            PricingGoal::TargetMargin(20.0),
            Marketplace::Shopee.profile(false),
        )
        .unwrap();

        journal.record(&calc);
        journal.record(&calc);

        let day_key = Utc::now().format("%Y-%m-%d").to_string();
        let path = journal.dir().join(format!("calculations-{}.jsonl", day_key));
        let contents = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let entry: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert!(entry["id"].is_string());
        assert!(entry["recorded_at"].is_string());
        assert_eq!(
            entry["calculation"]["outcome"]["price"],
            json!(calc.outcome.price)
        );

        std::fs::remove_dir_all(dir).ok();
    }
}
