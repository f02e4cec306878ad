use roster::{RecordStore, Student};
use tracing::instrument;

use super::terminal::{Colorize, print_header, print_separator};

/// Prints every record as a table, in insertion order.
#[instrument(level = "debug", skip_all)]
pub fn run(store: &RecordStore) {
    print_header("ALL STUDENT RECORDS");

    if store.is_empty() {
        println!(
            "  {}",
            "No records found in the database. Add a new record first (Option 1).".warning()
        );
        return;
    }

    print_separator();
    println!(
        "{}",
        format!(
            "| {:<13} | {:<20} | {:<4} | {:<20} | {:<4} | {:<6} | {:<11} |",
            "ADMN NO.", "NAME", "AGE", "COURSE", "YR", "GPA", "ATTENDANCE"
        )
        .heading()
    );
    print_separator();
    for student in store.list_all() {
        println!("{}", row(student));
    }
    print_separator();

    println!("\n  Total Records: {}", store.len());
}

/// Formats one table row. Long names and courses are cut to the column width.
fn row(student: &Student) -> String {
    format!(
        "| {:<13} | {:<20} | {:>4} | {:<20} | {:>4} | {:>6.2} | {:>10.2}% |",
        student.admission_no().as_str(),
        clip(student.name(), 20),
        student.age(),
        clip(student.course(), 20),
        student.year_of_study(),
        student.gpa(),
        student.attendance_percent(),
    )
}

fn clip(text: &str, width: usize) -> &str {
    text.char_indices().nth(width).map_or(text, |(end, _)| &text[..end])
}

#[cfg(test)]
mod tests {
    use roster::StudentForm;

    use super::*;

    #[test]
    fn row_is_aligned() {
        let student = Student::try_from(StudentForm {
            admission_no: "AP00000000001".parse().unwrap(),
            name: "Asha".to_string(),
            age: 20,
            course: "CS".to_string(),
            subjects: "Math,OS".to_string(),
            gpa: 8.5,
            attendance_percent: 92.0,
            year_of_study: 2,
        })
        .unwrap();

        assert_eq!(
            row(&student),
            "| AP00000000001 | Asha                 |   20 | CS                   |    2 |   8.50 |      92.00% |"
        );
    }

    #[test]
    fn clip_cuts_on_characters() {
        assert_eq!(clip("Computer Science and Engineering", 20), "Computer Science and");
        assert_eq!(clip("Öffentliches Recht", 5), "Öffen");
        assert_eq!(clip("CS", 20), "CS");
    }
}
