//! An in-memory collection of student records persisted to a flat file
//!
//! The [`RecordStore`] owns the records. Changes stay in memory until
//! [`RecordStore::save`] is called.

use std::{
    fmt,
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use super::codec::{self, DecodeError};
use crate::domain::{AdmissionNumber, Student};

/// Maximum number of records a store holds.
pub const CAPACITY: usize = 100;

/// A capacity-bounded, ordered collection of student records backed by a
/// single data file.
///
/// Admission numbers are unique within the collection, and the collection
/// never holds more than [`CAPACITY`] records.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    records: Vec<Student>,
    unsaved: bool,
}

impl RecordStore {
    /// Creates an empty store backed by the file at `path`.
    ///
    /// The filesystem is not touched.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::with_capacity(CAPACITY),
            unsaved: false,
        }
    }

    /// Loads records from the file at `path`.
    ///
    /// Loading never fails. A missing file gives an empty store, which is the
    /// normal first-run state. Whole blocks are read up to [`CAPACITY`]; a
    /// partial block at the end of the file is ignored. A block that does not
    /// decode to a valid record, or that repeats an earlier admission number,
    /// is skipped and the rest of the file is still loaded. Each of these is
    /// reported as a [`LoadNotice`].
    pub fn load(path: impl Into<PathBuf>) -> (Self, LoadReport) {
        let mut store = Self::new(path);
        let mut notices = Vec::new();

        match File::open(&store.path) {
            Ok(file) => store.read_from(file, &mut notices),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!("No data file at {}", store.path.display());
                notices.push(LoadNotice::Missing);
            }
            Err(e) => {
                tracing::warn!("Failed to open {}: {e}", store.path.display());
                notices.push(LoadNotice::Unreadable(e));
            }
        }

        let report = LoadReport {
            count: store.records.len(),
            notices,
        };
        tracing::info!(
            "Loaded {} records from {}",
            report.count,
            store.path.display()
        );
        (store, report)
    }

    fn read_from(&mut self, file: File, notices: &mut Vec<LoadNotice>) {
        let mut reader = BufReader::new(file);
        let read = match codec::read_blocks(&mut reader, CAPACITY) {
            Ok(read) => read,
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}", self.path.display());
                notices.push(LoadNotice::Unreadable(e));
                return;
            }
        };

        for (index, block) in read.blocks.iter().enumerate() {
            let student = match codec::decode(block) {
                Ok(student) => student,
                Err(error) => {
                    tracing::warn!("Skipped invalid block {index}: {error}");
                    notices.push(LoadNotice::InvalidBlock { index, error });
                    continue;
                }
            };
            if self.contains(student.admission_no()) {
                tracing::warn!(
                    "Skipped block {index}: duplicate admission number {}",
                    student.admission_no()
                );
                notices.push(LoadNotice::Duplicate {
                    index,
                    admission_no: student.admission_no().clone(),
                });
                continue;
            }
            self.records.push(student);
        }

        if read.ignored > 0 {
            tracing::warn!("Ignored {} blocks beyond capacity", read.ignored);
            notices.push(LoadNotice::OverCapacity {
                ignored_blocks: read.ignored,
            });
        }
        if read.trailing_bytes > 0 {
            tracing::warn!(
                "Ignored {} trailing bytes in {}",
                read.trailing_bytes,
                self.path.display()
            );
            notices.push(LoadNotice::Truncated {
                trailing_bytes: read.trailing_bytes,
            });
        }
    }

    /// Overwrites the data file with the current records, in order.
    ///
    /// The records are written to a temporary file next to the data file,
    /// which then replaces it. Either all records are written or the previous
    /// file is left as it was. The new file takes the permissions of the one
    /// it replaces.
    ///
    /// Returns the number of records written.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be created or written,
    /// or if it cannot replace the data file.
    pub fn save(&mut self) -> Result<usize, SaveError> {
        let count = self.write_file().map_err(|source| SaveError {
            path: self.path.clone(),
            source,
        })?;
        self.unsaved = false;
        tracing::info!("Saved {count} records to {}", self.path.display());
        Ok(count)
    }

    fn write_file(&self) -> io::Result<usize> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let tmp = NamedTempFile::new_in(dir)?;

        let mut writer = BufWriter::new(tmp);
        let count = codec::write_blocks(&mut writer, &self.records)?;
        writer.flush()?;
        let tmp = writer.into_inner().map_err(io::IntoInnerError::into_error)?;

        match std::fs::metadata(&self.path) {
            Ok(existing) => tmp.as_file().set_permissions(existing.permissions())?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }

        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(count)
    }

    /// Appends a record.
    ///
    /// The record is not persisted; call [`RecordStore::save`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`AddError::Capacity`] if the store is full, checked first,
    /// and [`AddError::Duplicate`] if a record with the same admission number
    /// already exists.
    pub fn add(&mut self, student: Student) -> Result<&Student, AddError> {
        if self.is_full() {
            return Err(AddError::Capacity);
        }
        if self.contains(student.admission_no()) {
            return Err(AddError::Duplicate(student.admission_no().clone()));
        }

        tracing::info!("Added record: {}", student.admission_no());
        self.records.push(student);
        self.unsaved = true;
        Ok(&self.records[self.records.len() - 1])
    }

    /// Finds the record with exactly this admission number.
    ///
    /// The match is case-sensitive.
    #[must_use]
    pub fn search(&self, admission_no: &str) -> Option<&Student> {
        let found = self
            .records
            .iter()
            .find(|student| student.admission_no().as_str() == admission_no);
        tracing::debug!("Search for {admission_no}: found = {}", found.is_some());
        found
    }

    /// Returns `true` if a record has exactly this admission number.
    #[must_use]
    pub fn contains(&self, admission_no: &str) -> bool {
        self.records
            .iter()
            .any(|student| student.admission_no().as_str() == admission_no)
    }

    /// All records, in insertion order.
    #[must_use]
    pub fn list_all(&self) -> &[Student] {
        &self.records
    }

    /// Removes every record and deletes the data file.
    ///
    /// The in-memory records are always cleared, even when the file cannot be
    /// deleted. A missing file counts as success.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file exists but cannot be removed.
    pub fn clear_all(&mut self) -> Result<ClearOutcome, ClearError> {
        let cleared = self.records.len();
        self.records.clear();
        tracing::info!("Cleared {cleared} records from memory");

        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("Deleted {}", self.path.display());
                self.unsaved = false;
                Ok(ClearOutcome::FileDeleted)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.unsaved = false;
                Ok(ClearOutcome::NoFile)
            }
            Err(source) => {
                tracing::warn!("Failed to delete {}: {source}", self.path.display());
                self.unsaved = true;
                Err(ClearError {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }

    /// The number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns `true` if no more records can be added.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.records.len() >= CAPACITY
    }

    /// The data file this store loads from and saves to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if the records differ from what was last loaded or
    /// saved.
    #[must_use]
    pub const fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }
}

/// The outcome of [`RecordStore::load`].
#[derive(Debug)]
pub struct LoadReport {
    /// Number of records loaded.
    pub count: usize,
    /// Anything worth telling the operator about the load.
    pub notices: Vec<LoadNotice>,
}

/// Something unusual found while loading.
///
/// None of these prevent the store from being used.
#[derive(Debug, thiserror::Error)]
pub enum LoadNotice {
    /// The data file does not exist yet.
    #[error("no data file found, starting with an empty record list")]
    Missing,
    /// The data file could not be read; nothing was loaded.
    #[error("data file could not be read: {0}")]
    Unreadable(#[source] io::Error),
    /// The file ended part-way through a block.
    #[error("ignored {trailing_bytes} trailing bytes that do not form a whole record")]
    Truncated {
        /// Bytes after the last whole block.
        trailing_bytes: usize,
    },
    /// The file holds more records than the store can.
    #[error("ignored {ignored_blocks} records beyond the capacity of {}", CAPACITY)]
    OverCapacity {
        /// Whole blocks not loaded.
        ignored_blocks: usize,
    },
    /// A block that is not a valid record was skipped.
    #[error("skipped invalid record {}: {error}", .index + 1)]
    InvalidBlock {
        /// Zero-based position of the block in the file.
        index: usize,
        /// Why the block was rejected.
        #[source]
        error: DecodeError,
    },
    /// A block repeats an admission number already loaded.
    #[error("skipped record {} with duplicate admission number {admission_no}", .index + 1)]
    Duplicate {
        /// Zero-based position of the block in the file.
        index: usize,
        /// The repeated admission number.
        admission_no: AdmissionNumber,
    },
}

/// Errors that can occur when adding a record.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AddError {
    /// The store already holds [`CAPACITY`] records.
    #[error("capacity reached ({} students), cannot add more records", CAPACITY)]
    Capacity,
    /// A record with this admission number already exists.
    #[error("a record with admission number {0} already exists")]
    Duplicate(AdmissionNumber),
}

/// The data file could not be written. Nothing in memory changed.
#[derive(Debug, thiserror::Error)]
#[error("could not save records to '{}'", .path.display())]
pub struct SaveError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl SaveError {
    /// The data file that could not be written.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// What happened to the data file during [`RecordStore::clear_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The data file was deleted.
    FileDeleted,
    /// There was no data file to delete.
    NoFile,
}

impl fmt::Display for ClearOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileDeleted => write!(f, "data file deleted"),
            Self::NoFile => write!(f, "no data file existed"),
        }
    }
}

/// The data file exists but could not be deleted.
///
/// The in-memory records were cleared anyway.
#[derive(Debug, thiserror::Error)]
#[error("'{}' exists but could not be deleted", .path.display())]
pub struct ClearError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl ClearError {
    /// The data file that could not be deleted.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
