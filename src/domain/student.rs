use super::{
    AdmissionNumber,
    validation::{
        COURSE_MAX, NAME_MAX, SUBJECTS_MAX, bound_text, is_valid_age, is_valid_attendance,
        is_valid_gpa, is_valid_year_of_study,
    },
};

/// A student record.
///
/// Every field satisfies its declared bounds: text fields fit their on-disk
/// width and numeric fields are within their inclusive ranges. Records are
/// built from a [`StudentForm`].
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    admission_no: AdmissionNumber,
    name: String,
    age: i32,
    course: String,
    subjects: String,
    gpa: f32,
    attendance_percent: f32,
    year_of_study: i32,
}

impl Student {
    /// The unique admission number.
    #[must_use]
    pub const fn admission_no(&self) -> &AdmissionNumber {
        &self.admission_no
    }

    /// The student's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Age in years.
    #[must_use]
    pub const fn age(&self) -> i32 {
        self.age
    }

    /// Course or major.
    #[must_use]
    pub fn course(&self) -> &str {
        &self.course
    }

    /// Subjects opted, as entered (comma-separated free text).
    #[must_use]
    pub fn subjects(&self) -> &str {
        &self.subjects
    }

    /// Grade point average out of 10.
    #[must_use]
    pub const fn gpa(&self) -> f32 {
        self.gpa
    }

    /// Attendance percentage.
    #[must_use]
    pub const fn attendance_percent(&self) -> f32 {
        self.attendance_percent
    }

    /// Year of study, 1 to 4.
    #[must_use]
    pub const fn year_of_study(&self) -> i32 {
        self.year_of_study
    }
}

/// The unvalidated fields of a student record.
///
/// Converting into a [`Student`] truncates over-long text and rejects
/// out-of-range numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentForm {
    /// The unique admission number.
    pub admission_no: AdmissionNumber,
    /// The student's name.
    pub name: String,
    /// Age in years.
    pub age: i32,
    /// Course or major.
    pub course: String,
    /// Subjects opted.
    pub subjects: String,
    /// Grade point average.
    pub gpa: f32,
    /// Attendance percentage.
    pub attendance_percent: f32,
    /// Year of study.
    pub year_of_study: i32,
}

/// A numeric field outside its accepted range.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FieldError {
    /// Age outside [`super::validation::AGE`].
    #[error("age {0} is outside 16-99")]
    Age(i32),
    /// GPA outside [`super::validation::GPA`].
    #[error("GPA {0} is outside 0.00-10.00")]
    Gpa(f32),
    /// Attendance outside [`super::validation::ATTENDANCE`].
    #[error("attendance {0} is outside 0.0-100.0")]
    Attendance(f32),
    /// Year of study outside [`super::validation::YEAR_OF_STUDY`].
    #[error("year of study {0} is outside 1-4")]
    YearOfStudy(i32),
}

impl TryFrom<StudentForm> for Student {
    type Error = FieldError;

    fn try_from(form: StudentForm) -> Result<Self, Self::Error> {
        let StudentForm {
            admission_no,
            name,
            age,
            course,
            subjects,
            gpa,
            attendance_percent,
            year_of_study,
        } = form;

        if !is_valid_age(age) {
            return Err(FieldError::Age(age));
        }
        if !is_valid_gpa(gpa) {
            return Err(FieldError::Gpa(gpa));
        }
        if !is_valid_attendance(attendance_percent) {
            return Err(FieldError::Attendance(attendance_percent));
        }
        if !is_valid_year_of_study(year_of_study) {
            return Err(FieldError::YearOfStudy(year_of_study));
        }

        Ok(Self {
            admission_no,
            name: bound_text(&name, NAME_MAX),
            age,
            course: bound_text(&course, COURSE_MAX),
            subjects: bound_text(&subjects, SUBJECTS_MAX),
            gpa,
            attendance_percent,
            year_of_study,
        })
    }
}

impl From<Student> for StudentForm {
    fn from(student: Student) -> Self {
        let Student {
            admission_no,
            name,
            age,
            course,
            subjects,
            gpa,
            attendance_percent,
            year_of_study,
        } = student;

        Self {
            admission_no,
            name,
            age,
            course,
            subjects,
            gpa,
            attendance_percent,
            year_of_study,
        }
    }
}
