/// Fixed-width binary encoding of student records.
pub mod codec;
mod store;

pub use codec::{BLOCK_SIZE, DecodeError};
pub use store::{
    AddError, CAPACITY, ClearError, ClearOutcome, LoadNotice, LoadReport, RecordStore, SaveError,
};
