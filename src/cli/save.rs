use roster::RecordStore;
use tracing::instrument;

use super::terminal::Colorize;

/// Saves the store and reports the outcome. A failure leaves the records in
/// memory untouched.
#[instrument(level = "debug", skip_all)]
pub fn run(store: &mut RecordStore) {
    match store.save() {
        Ok(count) => {
            let message = format!("Successfully saved {count} records to the database.");
            println!("\n  {}", message.success());
        }
        Err(e) => {
            let message = format!("ERROR: {:#}. Records not saved.", anyhow::Error::from(e));
            println!("\n  {}", message.error());
        }
    }
}
