use std::io;

use roster::{Prompt, RecordStore, domain::is_valid_admission_number};
use tracing::instrument;

use super::terminal::{Colorize, print_header, print_separator};

/// Asks for an admission number and shows the matching record.
#[instrument(level = "debug", skip_all)]
pub fn run<P: Prompt + ?Sized>(prompt: &mut P, store: &RecordStore) -> io::Result<()> {
    print_header("SEARCH STUDENT RECORD");

    let Some(answer) = prompt.ask("  Enter Admission Number to search (APxxxxxxxxxxx): ")? else {
        return Ok(());
    };
    let admission_no = answer.trim();

    if !is_valid_admission_number(admission_no) {
        println!("  {}", "Invalid Admission Number format.".error());
        return Ok(());
    }

    let Some(student) = store.search(admission_no) else {
        let message = format!("[NOT FOUND] No student found with Admission Number: {admission_no}");
        println!("\n  {}", message.error());
        return Ok(());
    };

    println!("\n  {}", "[MATCH FOUND]".success());
    print_separator();
    println!("  Admission No:  {}", student.admission_no().as_str().info());
    println!("  Name:          {}", student.name());
    println!("  Age:           {}", student.age());
    println!("  Course/Major:  {}", student.course());
    println!("  Year of Study: {}", student.year_of_study());
    println!("  Subjects:      {}", student.subjects());
    println!("  GPA:           {:.2} / 10.00", student.gpa());
    println!("  Attendance:    {:.2}%", student.attendance_percent());
    print_separator();

    Ok(())
}
