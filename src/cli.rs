use std::{
    io,
    path::{Path, PathBuf},
    str::FromStr,
};

mod add;
mod clear;
mod list;
mod save;
mod search;
mod terminal;

use clap::ArgAction;
use roster::{Config, LoadNotice, LoadReport, Prompt, RecordStore, prompt::LinePrompt};
use terminal::{Colorize, print_header, print_separator};

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The configuration file
    #[arg(short, long, default_value = "roster.toml")]
    config: PathBuf,

    /// The data file to load and save records, overriding the configuration
    #[arg(short, long)]
    file: Option<PathBuf>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let mut config = load_config(&self.config);
        if let Some(file) = self.file {
            config.set_data_file(file);
        }

        let (mut store, report) = RecordStore::load(config.data_file());
        print_load_report(&store, &report);

        let mut prompt = LinePrompt::stdio();
        run_menu(&mut prompt, &mut store, &config)?;
        Ok(())
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout belongs to the menu
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn load_config(path: &Path) -> Config {
    Config::load(path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}

fn print_load_report(store: &RecordStore, report: &LoadReport) {
    for notice in &report.notices {
        match notice {
            LoadNotice::Missing => println!(
                "{}",
                format!(
                    "Database file '{}' not found. Starting with an empty record list.",
                    store.path().display()
                )
                .warning()
            ),
            other => println!("{}", format!("Warning: {other}").warning()),
        }
    }
    if !matches!(report.notices.as_slice(), [LoadNotice::Missing]) {
        println!(
            "{}",
            format!(
                "Successfully loaded {} records from the database.",
                report.count
            )
            .success()
        );
    }
}

/// An entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Add,
    List,
    Search,
    Save,
    DeleteAll,
    Exit,
}

impl MenuChoice {
    const ALL: [Self; 6] = [
        Self::Add,
        Self::List,
        Self::Search,
        Self::Save,
        Self::DeleteAll,
        Self::Exit,
    ];

    const fn description(self) -> &'static str {
        match self {
            Self::Add => "Add New Student Record",
            Self::List => "View All Student Records",
            Self::Search => "Search Record by Admission Number",
            Self::Save => "Save Records to File",
            Self::DeleteAll => "DELETE ALL RECORDS (Start Fresh)",
            Self::Exit => "Exit Application (Unsaved data will be lost!)",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid choice '{0}': enter a number between 1 and 6")]
struct InvalidChoice(String);

impl FromStr for MenuChoice {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| InvalidChoice(s.trim().to_string()))
    }
}

fn print_menu() {
    print_header("STUDENT RECORD MANAGEMENT SYSTEM");
    println!(
        "  {}\n",
        "Welcome! Select an option from the menu below:".dim()
    );
    for (number, choice) in (1..).zip(MenuChoice::ALL) {
        println!("  {} {}", format!("[{number}]").info(), choice.description());
    }
    print_separator();
}

/// Runs the interactive menu until the operator exits or the input ends.
///
/// Nothing is saved on exit.
fn run_menu<P: Prompt + ?Sized>(
    prompt: &mut P,
    store: &mut RecordStore,
    config: &Config,
) -> io::Result<()> {
    loop {
        print_menu();
        let Some(answer) = prompt.ask("  Enter your choice: ")? else {
            say_goodbye(store);
            return Ok(());
        };

        let choice = match answer.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(e) => {
                println!("\n  {}", e.to_string().error());
                continue;
            }
        };
        tracing::debug!("Menu choice: {choice:?}");

        match choice {
            MenuChoice::Add => add::run(prompt, store, config)?,
            MenuChoice::List => list::run(store),
            MenuChoice::Search => search::run(prompt, store)?,
            MenuChoice::Save => save::run(store),
            MenuChoice::DeleteAll => clear::run(prompt, store)?,
            MenuChoice::Exit => {
                say_goodbye(store);
                return Ok(());
            }
        }
    }
}

fn say_goodbye(store: &RecordStore) {
    if store.has_unsaved_changes() {
        println!(
            "\n  {}",
            "Unsaved changes were not written to file and are discarded.".warning()
        );
    }
    println!(
        "\n  {}",
        "Thank you for using the Student Management System. Goodbye!".info()
    );
}
