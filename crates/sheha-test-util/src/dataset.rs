use std::path::{Path, PathBuf};

/// File name used by the dataset writers.
pub const DATASET_FILE: &str = "qa.csv";

/// Write a `question,answer` CSV with one record per pair into `dir`.
///
/// Fields are quoted as needed, so answers may contain commas, quotes and
/// newlines. Returns the path of the written file.
pub fn write_dataset(dir: &Path, rows: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(DATASET_FILE);
    let mut writer = csv::Writer::from_path(&path).unwrap();
    writer.write_record(["question", "answer"]).unwrap();
    for (question, answer) in rows {
        writer.write_record([question, answer]).unwrap();
    }
    writer.flush().unwrap();
    path
}

/// Write `contents` verbatim as the dataset file in `dir`.
///
/// For headers and malformed records that [`write_dataset`] cannot express.
pub fn write_raw_dataset(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join(DATASET_FILE);
    std::fs::write(&path, contents).unwrap();
    path
}
