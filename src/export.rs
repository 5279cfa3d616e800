// 📤 CSV export of the transaction history
// Same column naming as the bank statement CSVs: Title_Case headers.

use crate::entities::Transaction;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "Id")]
    pub id: String,

    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Time")]
    pub time: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Merchant")]
    pub merchant: String,

    #[serde(rename = "Category")]
    pub category: String,

    #[serde(rename = "Kind")]
    pub kind: String,

    #[serde(rename = "Amount")]
    pub amount: String,

    #[serde(rename = "Signed_Amount")]
    pub signed_amount: String,
}

impl From<&Transaction> for TransactionRecord {
    fn from(tx: &Transaction) -> Self {
        TransactionRecord {
            id: tx.id.clone(),
            date: tx.date.clone(),
            time: tx.time.clone(),
            name: tx.name.clone(),
            merchant: tx.merchant.clone().unwrap_or_default(),
            category: tx.category.as_str().to_string(),
            kind: tx.kind.as_str().to_string(),
            amount: format!("{:.2}", tx.amount),
            signed_amount: format!("{:.2}", tx.signed_amount()),
        }
    }
}

/// Write rows as CSV with a header line; returns the number of rows written
pub fn write_csv<W: io::Write>(writer: W, transactions: &[Transaction]) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);

    for tx in transactions {
        wtr.serialize(TransactionRecord::from(tx))
            .with_context(|| format!("Failed to write transaction {}", tx.id))?;
    }

    wtr.flush().context("Failed to flush CSV output")?;
    Ok(transactions.len())
}

pub fn export_to_path(path: &Path, transactions: &[Transaction]) -> Result<usize> {
    let file = File::create(path).with_context(|| format!("Failed to create export file: {:?}", path))?;
    let count = write_csv(file, transactions)?;
    tracing::info!(path = %path.display(), rows = count, "transaction history exported");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::list_transactions;

    #[test]
    fn test_write_csv_header_and_signs() {
        let mut out = Vec::new();
        let rows = list_transactions();

        let count = write_csv(&mut out, &rows[..1]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(count, 1);
        assert_eq!(
            lines.next().unwrap(),
            "Id,Date,Time,Name,Merchant,Category,Kind,Amount,Signed_Amount"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1,Aujourd'hui,14:32,Café du Commerce,CAFE COMMERCE PARIS,Alimentation,expense,4.50,-4.50"
        );
    }

    #[test]
    fn test_export_to_path_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let rows = list_transactions();

        assert_eq!(export_to_path(&path, &rows).unwrap(), 8);

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let records: Vec<TransactionRecord> = rdr.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 8);
        assert_eq!(records[4].category, "Revenus");
        assert_eq!(records[4].signed_amount, "2500.00");
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("history.csv");
        assert!(export_to_path(&path, &list_transactions()).is_err());
    }
}
