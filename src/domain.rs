//! Domain models for student records.
//!
//! This module contains the record type, its admission-number key, the field
//! range rules, and configuration.

/// Admission number key type and format validation.
pub mod admission;
pub use admission::{AdmissionNumber, Error as AdmissionError, is_valid_admission_number};

/// Student record type.
pub mod student;
pub use student::{FieldError, Student, StudentForm};

/// Inclusive-range predicates and text bounds for record fields.
pub mod validation;

mod config;
pub use config::Config;
