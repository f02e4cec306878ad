use std::io;

use roster::{
    AdmissionNumber, Config, Prompt, RecordStore, Student, StudentForm,
    domain::validation::{
        is_valid_age, is_valid_attendance, is_valid_gpa, is_valid_year_of_study,
    },
    prompt::ask_until,
};
use tracing::instrument;

use super::{
    save,
    terminal::{Colorize, print_header},
};

/// Asks for a new record and adds it to the store.
///
/// A malformed or duplicate admission number aborts straight away, before
/// any other field is asked for.
#[instrument(level = "debug", skip_all)]
pub fn run<P: Prompt + ?Sized>(
    prompt: &mut P,
    store: &mut RecordStore,
    config: &Config,
) -> io::Result<()> {
    print_header("ADD NEW STUDENT RECORD");

    if store.is_full() {
        println!(
            "  {}",
            "Database capacity reached. Cannot add more records.".error()
        );
        return Ok(());
    }

    let Some(form) = read_form(prompt, store)? else {
        return Ok(());
    };

    let student = match Student::try_from(form) {
        Ok(student) => student,
        Err(e) => {
            println!("  {}", e.to_string().error());
            return Ok(());
        }
    };

    match store.add(student) {
        Ok(added) => {
            let name = added.name().to_string();
            let message = format!(
                "[SUCCESS] Record for {name} added successfully! Current total: {}",
                store.len()
            );
            println!("\n  {}", message.success());
        }
        Err(e) => {
            println!("  {}", e.to_string().error());
            return Ok(());
        }
    }

    if config.confirm_save_after_add {
        let answer = prompt.ask("  Do you want to save the changes to file now? (Y/N): ")?;
        if answer.is_some_and(|a| a.trim_start().starts_with(['y', 'Y'])) {
            save::run(store);
        }
    }

    Ok(())
}

/// Reads every field of a new record.
///
/// Returns `Ok(None)` if the admission number is malformed or already taken,
/// or if the input ends part-way through. Numeric fields are asked again
/// until they are in range.
fn read_form<P: Prompt + ?Sized>(
    prompt: &mut P,
    store: &RecordStore,
) -> io::Result<Option<StudentForm>> {
    let Some(answer) = prompt.ask("  Enter Admission Number (APxxxxxxxxxxx): ")? else {
        return Ok(None);
    };
    let admission_no = match answer.trim().parse::<AdmissionNumber>() {
        Ok(admission_no) => admission_no,
        Err(e) => {
            tracing::debug!("{e}");
            println!(
                "  {}",
                "Invalid Admission Number format. Must be AP followed by 11 digits.".error()
            );
            return Ok(None);
        }
    };
    if store.contains(&admission_no) {
        let message = format!("Record with Admission Number {admission_no} already exists.");
        println!("  {}", message.error());
        return Ok(None);
    }

    let Some(name) = prompt.ask("  Enter Student Name: ")? else {
        return Ok(None);
    };
    let Some(age) = ask_until(prompt, "  Enter Age (16-99): ", |s| {
        s.parse().ok().filter(|&age| is_valid_age(age))
    })?
    else {
        return Ok(None);
    };
    let Some(course) = prompt.ask("  Enter Course/Major: ")? else {
        return Ok(None);
    };
    let Some(subjects) = prompt.ask("  Enter Subjects Opted (Comma separated): ")? else {
        return Ok(None);
    };
    let Some(gpa) = ask_until(prompt, "  Enter GPA (0.00-10.00): ", |s| {
        s.parse().ok().filter(|&gpa| is_valid_gpa(gpa))
    })?
    else {
        return Ok(None);
    };
    let Some(attendance_percent) = ask_until(
        prompt,
        "  Enter Attendance Percentage (0.0-100.0): ",
        |s| s.parse().ok().filter(|&pct| is_valid_attendance(pct)),
    )?
    else {
        return Ok(None);
    };
    let Some(year_of_study) = ask_until(prompt, "  Enter Year of Study (1-4): ", |s| {
        s.parse().ok().filter(|&year| is_valid_year_of_study(year))
    })?
    else {
        return Ok(None);
    };

    Ok(Some(StudentForm {
        admission_no,
        name,
        age,
        course,
        subjects,
        gpa,
        attendance_percent,
        year_of_study,
    }))
}
