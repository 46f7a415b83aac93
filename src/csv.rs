use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::machine::MachineStats;
use crate::model::{Op, ParseCoinError, ParseProductError};

/// Errors that can occur when parsing session csv rows
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized op '{op}'")]
    UnrecognizedOp { line: usize, op: String },

    #[error("line {line}: {op} missing selector")]
    MissingSelector { line: usize, op: String },

    #[error("line {line}: {source}")]
    BadCoin {
        line: usize,
        source: ParseCoinError,
    },

    #[error("line {line}: {source}")]
    BadProduct {
        line: usize,
        source: ParseProductError,
    },
}

#[derive(Debug, Deserialize)]
struct InputRow {
    op: String,
    arg: Option<String>,
}

#[derive(Debug, Serialize)]
struct OutputRow {
    name: String,
    kind: String,
    unit_value: String,
    count: u32,
}

/// Read machine operations from a session csv file
pub fn read_ops(path: impl AsRef<Path>) -> impl Iterator<Item = Result<Op, CsvError>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .expect("failed to open csv file");

    reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            let selector = |op: &str| {
                row.arg
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| CsvError::MissingSelector {
                        line,
                        op: op.to_string(),
                    })
            };
            match row.op.as_str() {
                "insert" => {
                    let coin = selector("insert")?
                        .parse()
                        .map_err(|source| CsvError::BadCoin { line, source })?;
                    Ok(Op::InsertCoin(coin))
                }
                "select" => {
                    let product = selector("select")?
                        .parse()
                        .map_err(|source| CsvError::BadProduct { line, source })?;
                    Ok(Op::SelectProduct(product))
                }
                "cancel" => Ok(Op::Cancel),
                "reset" => Ok(Op::AdminReset),
                "stats" => Ok(Op::Stats),
                other => Err(CsvError::UnrecognizedOp {
                    line,
                    op: other.to_string(),
                }),
            }
        })
}

/// write the final machine stats to stdout in csv format
pub fn write_stats(stats: &MachineStats) {
    let stdout = io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());

    for (coin, count) in &stats.coins {
        let row = OutputRow {
            name: coin.to_string(),
            kind: "coin".to_string(),
            unit_value: coin.value().to_string(),
            count: *count,
        };
        writer.serialize(&row).expect("failed to write csv row");
    }

    for (product, count) in &stats.products {
        let row = OutputRow {
            name: product.to_string(),
            kind: "product".to_string(),
            unit_value: product.price().to_string(),
            count: *count,
        };
        writer.serialize(&row).expect("failed to write csv row");
    }

    writer.flush().expect("failed to flush csv writer");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coin, Product};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn read_insert() {
        let file = write_csv("op,arg\ninsert,fifty_cents\n");
        let results: Vec<_> = read_ops(file.path()).collect();
        assert_eq!(results.len(), 1);

        let op = results.into_iter().next().unwrap().unwrap();
        assert!(matches!(op, Op::InsertCoin(Coin::FiftyCents)));
    }

    #[test]
    fn read_select() {
        let file = write_csv("op,arg\nselect,coke\n");
        let results: Vec<_> = read_ops(file.path()).collect();
        assert_eq!(results.len(), 1);

        let op = results.into_iter().next().unwrap().unwrap();
        assert!(matches!(op, Op::SelectProduct(Product::Coke)));
    }

    #[test]
    fn read_ops_without_selector() {
        let file = write_csv("op,arg\ncancel,\nreset,\nstats,\n");
        let results: Vec<_> = read_ops(file.path()).collect();
        assert_eq!(results.len(), 3);
        assert!(matches!(results[0], Ok(Op::Cancel)));
        assert!(matches!(results[1], Ok(Op::AdminReset)));
        assert!(matches!(results[2], Ok(Op::Stats)));
    }

    #[test]
    fn read_with_whitespace() {
        let file = write_csv("op, arg\ninsert, one_dollar\n");
        let results: Vec<_> = read_ops(file.path()).collect();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_ok());
    }

    #[test]
    fn read_returns_error_for_unknown_op() {
        let file = write_csv("op,arg\ntilt,\n");
        let results: Vec<_> = read_ops(file.path()).collect();
        assert_eq!(results.len(), 1);
        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(err, CsvError::UnrecognizedOp { line: 2, .. }));
    }

    #[test]
    fn read_returns_error_for_missing_selector() {
        let file = write_csv("op,arg\nselect,\n");
        let results: Vec<_> = read_ops(file.path()).collect();
        assert_eq!(results.len(), 1);
        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(err, CsvError::MissingSelector { line: 2, .. }));
    }

    #[test]
    fn read_returns_error_for_unknown_coin() {
        let file = write_csv("op,arg\ninsert,three_dollars\n");
        let results: Vec<_> = read_ops(file.path()).collect();
        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(err, CsvError::BadCoin { line: 2, .. }));
    }

    #[test]
    fn read_returns_error_for_unknown_product() {
        let file = write_csv("op,arg\nselect,fanta\n");
        let results: Vec<_> = read_ops(file.path()).collect();
        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(err, CsvError::BadProduct { line: 2, .. }));
    }
}
