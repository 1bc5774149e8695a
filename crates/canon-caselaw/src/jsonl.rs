//! JSONL case-law archive: one ruling per line.
//!
//! The portable interchange format. Every record is a single JSON line
//! carrying a signature and its verdict; blank lines and `#` comments are
//! tolerated on read. Writes replace the file atomically.

use crate::CaseLawError;
use crate::store::VerdictStore;
use canon_kernel::{Signature, Verdict};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// One archived ruling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRecord {
    pub signature: Signature,
    pub verdict: Verdict,
}

/// File-backed store with an in-memory index.
///
/// The whole archive is hydrated at open; every store rewrites the file
/// through a temp-file rename so a crash never leaves a torn archive.
pub struct JsonlStore {
    path: PathBuf,
    rulings: Mutex<BTreeMap<String, Verdict>>,
}

impl JsonlStore {
    /// Open an archive, hydrating any existing records.
    ///
    /// Duplicate signatures resolve with last-write-wins, matching
    /// append-style producers.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CaseLawError> {
        let path = path.as_ref().to_path_buf();
        let mut rulings = BTreeMap::new();
        if path.exists() {
            for record in read_records_from_path(&path)? {
                rulings.insert(record.signature.as_str().to_string(), record.verdict);
            }
        }
        Ok(Self {
            path,
            rulings: Mutex::new(rulings),
        })
    }

    pub fn len(&self) -> usize {
        self.rulings.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn persist(&self, rulings: &BTreeMap<String, Verdict>) -> Result<(), CaseLawError> {
        let records: Vec<CaseRecord> = rulings
            .iter()
            .map(|(signature, verdict)| CaseRecord {
                signature: Signature(signature.clone()),
                verdict: verdict.clone(),
            })
            .collect();
        write_records_to_path(&self.path, &records)
    }
}

impl VerdictStore for JsonlStore {
    fn load(&self, signature: &Signature) -> Result<Option<Verdict>, CaseLawError> {
        let rulings = self.rulings.lock().map_err(|_| CaseLawError::Poisoned)?;
        Ok(rulings.get(signature.as_str()).cloned())
    }

    fn store(&self, signature: &Signature, verdict: &Verdict) -> Result<(), CaseLawError> {
        let mut rulings = self.rulings.lock().map_err(|_| CaseLawError::Poisoned)?;
        rulings.insert(signature.as_str().to_string(), verdict.clone());
        self.persist(&rulings)
    }
}

/// Read case records from a JSONL reader.
pub fn read_records(reader: impl BufRead) -> Result<Vec<CaseRecord>, CaseLawError> {
    let mut records = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| CaseLawError::Io(line_no + 1, e.to_string()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let record: CaseRecord = serde_json::from_str(trimmed)
            .map_err(|e| CaseLawError::Parse(line_no + 1, e.to_string()))?;
        records.push(record);
    }
    Ok(records)
}

/// Read case records from a JSONL file path.
pub fn read_records_from_path(path: impl AsRef<Path>) -> Result<Vec<CaseRecord>, CaseLawError> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).map_err(|e| CaseLawError::Io(0, format!("{}: {e}", path.display())))?;
    validate_substrate_bytes(path, &bytes)?;
    let reader = BufReader::new(bytes.as_slice());
    read_records(reader)
}

/// Write case records to a JSONL file path, atomically.
pub fn write_records_to_path(
    path: impl AsRef<Path>,
    records: &[CaseRecord],
) -> Result<(), CaseLawError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| CaseLawError::Io(0, format!("{parent:?}: {e}")))?;
    }

    let tmp_path = tmp_write_path(path);
    let write_result = (|| -> Result<(), CaseLawError> {
        let file = File::create(&tmp_path)
            .map_err(|e| CaseLawError::Io(0, format!("{}: {e}", tmp_path.display())))?;
        let mut writer = BufWriter::new(file);
        for record in records {
            let line = serde_json::to_string(record)
                .map_err(|e| CaseLawError::Serialize(e.to_string()))?;
            writeln!(writer, "{line}")
                .map_err(|e| CaseLawError::Io(0, format!("{}: {e}", tmp_path.display())))?;
        }
        writer
            .flush()
            .map_err(|e| CaseLawError::Io(0, format!("{}: {e}", tmp_path.display())))?;
        Ok(())
    })();

    if let Err(error) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CaseLawError::Io(
            0,
            format!("{} -> {}: {e}", tmp_path.display(), path.display()),
        )
    })?;

    Ok(())
}

fn tmp_write_path(path: &Path) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut tmp: OsString = path.as_os_str().to_os_string();
    tmp.push(format!(".tmp.{}.{}", std::process::id(), unique));
    PathBuf::from(tmp)
}

fn validate_substrate_bytes(path: &Path, bytes: &[u8]) -> Result<(), CaseLawError> {
    if bytes.contains(&0) {
        return Err(CaseLawError::Corrupt(format!(
            "{}: contains NUL byte(s)",
            path.display()
        )));
    }
    if std::str::from_utf8(bytes).is_err() {
        return Err(CaseLawError::Corrupt(format!(
            "{}: contains non-UTF-8 byte sequence(s)",
            path.display()
        )));
    }
    Ok(())
}
