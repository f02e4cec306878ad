use std::io;

use roster::{ClearOutcome, Prompt, RecordStore};
use tracing::instrument;

use super::terminal::{Colorize, print_header};

/// Deletes every record, in memory and on disk, once the operator types `YES`.
#[instrument(level = "debug", skip_all)]
pub fn run<P: Prompt + ?Sized>(prompt: &mut P, store: &mut RecordStore) -> io::Result<()> {
    print_header("DELETE ALL RECORDS");

    println!(
        "\n  {}",
        "WARNING: This action is permanent and cannot be undone.".error()
    );
    let answer = prompt.ask(
        "  Are you sure you want to delete ALL student records? (Type 'YES' to confirm): ",
    )?;
    if !answer.as_deref().is_some_and(is_confirmed) {
        println!("\n  {}", "Confirmation failed. Operation cancelled.".warning());
        return Ok(());
    }

    let path = store.path().display().to_string();
    match store.clear_all() {
        Ok(ClearOutcome::FileDeleted) => {
            let message = format!(
                "[SUCCESS] All in-memory records cleared and file '{path}' successfully deleted."
            );
            println!("\n  {}", message.success());
        }
        Ok(ClearOutcome::NoFile) => {
            let message = format!("[INFO] File '{path}' did not exist. Records cleared from memory.");
            println!("\n  {}", message.info());
        }
        Err(e) => {
            let message = format!(
                "[ERROR] {:#}. Records were cleared from memory only.",
                anyhow::Error::from(e)
            );
            println!("\n  {}", message.error());
        }
    }

    Ok(())
}

fn is_confirmed(answer: &str) -> bool {
    answer.trim() == "YES"
}
