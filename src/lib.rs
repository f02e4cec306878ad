//! Student record keeping
//!
//! Student records are kept in memory by a [`RecordStore`] and persisted as
//! fixed-size blocks in a single flat file.

pub mod domain;
pub use domain::{AdmissionNumber, Config, Student, StudentForm};

/// Flat-file storage for student records.
pub mod storage;
pub use storage::{
    AddError, ClearError, ClearOutcome, LoadNotice, LoadReport, RecordStore, SaveError,
};

/// Synchronous line-based input used by the interactive front end.
pub mod prompt;
pub use prompt::{LinePrompt, Prompt};
