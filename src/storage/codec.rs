//! Fixed-width binary encoding of student records.
//!
//! A data file is a sequence of [`BLOCK_SIZE`]-byte blocks written back to
//! back, with no header, length prefix or checksum. Each block holds one
//! record:
//!
//! | Offset | Width | Field                                  |
//! |--------|-------|----------------------------------------|
//! | 0      | 14    | admission number, NUL-padded           |
//! | 14     | 50    | name, NUL-padded                       |
//! | 64     | 4     | age, `i32`                             |
//! | 68     | 30    | course, NUL-padded                     |
//! | 98     | 100   | subjects, NUL-padded                   |
//! | 198    | 2     | padding, zero                          |
//! | 200    | 4     | GPA, `f32`                             |
//! | 204    | 4     | attendance percentage, `f32`           |
//! | 208    | 4     | year of study, `i32`                   |
//!
//! Numbers are little-endian. Every text field keeps at least one trailing
//! NUL.

use std::{
    borrow::Cow,
    io::{self, Read, Write},
    ops::Range,
};

use crate::domain::{AdmissionError, FieldError, Student, StudentForm};

/// Size in bytes of one encoded record.
pub const BLOCK_SIZE: usize = 212;

const ADMISSION_NO: Range<usize> = 0..14;
const NAME: Range<usize> = 14..64;
const AGE: Range<usize> = 64..68;
const COURSE: Range<usize> = 68..98;
const SUBJECTS: Range<usize> = 98..198;
const GPA: Range<usize> = 200..204;
const ATTENDANCE: Range<usize> = 204..208;
const YEAR_OF_STUDY: Range<usize> = 208..212;

/// Errors that can occur when decoding a block.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DecodeError {
    /// The admission number is malformed.
    #[error(transparent)]
    AdmissionNumber(#[from] AdmissionError),
    /// A numeric field is out of range.
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Encodes a record into a single block.
#[must_use]
pub fn encode(student: &Student) -> [u8; BLOCK_SIZE] {
    let mut block = [0u8; BLOCK_SIZE];

    put_text(&mut block[ADMISSION_NO], student.admission_no());
    put_text(&mut block[NAME], student.name());
    block[AGE].copy_from_slice(&student.age().to_le_bytes());
    put_text(&mut block[COURSE], student.course());
    put_text(&mut block[SUBJECTS], student.subjects());
    block[GPA].copy_from_slice(&student.gpa().to_le_bytes());
    block[ATTENDANCE].copy_from_slice(&student.attendance_percent().to_le_bytes());
    block[YEAR_OF_STUDY].copy_from_slice(&student.year_of_study().to_le_bytes());

    block
}

/// Decodes a single block into a record.
///
/// Text that is not UTF-8 is decoded lossily, so bytes in a legacy encoding
/// still load.
///
/// # Errors
///
/// Returns an error if the decoded fields do not form a valid record.
pub fn decode(block: &[u8; BLOCK_SIZE]) -> Result<Student, DecodeError> {
    let form = StudentForm {
        admission_no: take_text(&block[ADMISSION_NO]).parse()?,
        name: take_text(&block[NAME]).into_owned(),
        age: i32::from_le_bytes(word(block, AGE)),
        course: take_text(&block[COURSE]).into_owned(),
        subjects: take_text(&block[SUBJECTS]).into_owned(),
        gpa: f32::from_le_bytes(word(block, GPA)),
        attendance_percent: f32::from_le_bytes(word(block, ATTENDANCE)),
        year_of_study: i32::from_le_bytes(word(block, YEAR_OF_STUDY)),
    };

    Ok(Student::try_from(form)?)
}

/// Writes each record as one block.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_blocks<'a, W, I>(writer: &mut W, students: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Student>,
{
    let mut count = 0;
    for student in students {
        writer.write_all(&encode(student))?;
        count += 1;
    }
    Ok(count)
}

/// The raw blocks read from a data file.
#[derive(Debug, Default)]
pub struct Blocks {
    /// Whole blocks, at most the requested limit.
    pub blocks: Vec<[u8; BLOCK_SIZE]>,
    /// Whole blocks found beyond the limit and not returned.
    pub ignored: usize,
    /// Bytes at the end of the input that did not make a whole block.
    pub trailing_bytes: usize,
}

/// Reads whole blocks until the end of the input.
///
/// At most `limit` blocks are kept. The rest of the input is still consumed
/// so that blocks beyond the limit, and a partial block at the end, can be
/// reported.
///
/// # Errors
///
/// Returns an error if the reader fails.
pub fn read_blocks<R: Read>(reader: &mut R, limit: usize) -> io::Result<Blocks> {
    let mut out = Blocks::default();
    loop {
        let mut block = [0u8; BLOCK_SIZE];
        let filled = fill(reader, &mut block)?;
        if filled < BLOCK_SIZE {
            out.trailing_bytes = filled;
            return Ok(out);
        }
        if out.blocks.len() < limit {
            out.blocks.push(block);
        } else {
            out.ignored += 1;
        }
    }
}

/// Reads until `buf` is full or the input ends, returning the bytes read.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn put_text(field: &mut [u8], text: &str) {
    // keep the final byte as a terminator
    let len = text.len().min(field.len() - 1);
    field[..len].copy_from_slice(&text.as_bytes()[..len]);
}

fn take_text(field: &[u8]) -> Cow<'_, str> {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end])
}

fn word(block: &[u8; BLOCK_SIZE], range: Range<usize>) -> [u8; 4] {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&block[range]);
    bytes
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn asha() -> Student {
        Student::try_from(StudentForm {
            admission_no: "AP00000000001".parse().unwrap(),
            name: "Asha".to_string(),
            age: 20,
            course: "CS".to_string(),
            subjects: "Math,OS".to_string(),
            gpa: 8.5,
            attendance_percent: 92.0,
            year_of_study: 2,
        })
        .unwrap()
    }

    #[test]
    fn block_layout() {
        let block = encode(&asha());

        assert_eq!(&block[0..13], b"AP00000000001");
        assert_eq!(block[13], 0);
        assert_eq!(&block[14..18], b"Asha");
        assert!(block[18..64].iter().all(|&b| b == 0));
        assert_eq!(&block[64..68], &20i32.to_le_bytes());
        assert_eq!(&block[68..70], b"CS");
        assert_eq!(&block[98..105], b"Math,OS");
        assert_eq!(&block[198..200], &[0, 0]);
        assert_eq!(&block[200..204], &8.5f32.to_le_bytes());
        assert_eq!(&block[204..208], &92.0f32.to_le_bytes());
        assert_eq!(&block[208..212], &2i32.to_le_bytes());
    }

    #[test]
    fn decode_reverses_encode() {
        let student = asha();
        assert_eq!(decode(&encode(&student)).unwrap(), student);
    }

    #[test]
    fn full_width_text_keeps_terminator() {
        let student = Student::try_from(StudentForm {
            name: "n".repeat(200),
            ..StudentForm::from(asha())
        })
        .unwrap();

        let block = encode(&student);

        assert_eq!(block[NAME.end - 1], 0);
        assert_eq!(decode(&block).unwrap().name(), "n".repeat(49));
    }

    #[test]
    fn padding_is_ignored_on_read() {
        let mut block = encode(&asha());
        block[198] = 0xAB;
        block[199] = 0xCD;

        assert_eq!(decode(&block).unwrap(), asha());
    }

    #[test]
    fn bytes_after_terminator_are_ignored() {
        let mut block = encode(&asha());
        // leftover bytes from a longer name, as a C writer would leave them
        block[19..25].copy_from_slice(b"ignore");

        assert_eq!(decode(&block).unwrap().name(), "Asha");
    }

    #[test]
    fn invalid_admission_number_is_rejected() {
        let mut block = encode(&asha());
        block[0] = b'X';

        assert!(matches!(
            decode(&block),
            Err(DecodeError::AdmissionNumber(_))
        ));
    }

    #[test]
    fn out_of_range_number_is_rejected() {
        let mut block = encode(&asha());
        block[AGE].copy_from_slice(&7i32.to_le_bytes());

        assert_eq!(decode(&block), Err(DecodeError::Field(FieldError::Age(7))));
    }

    #[test]
    fn non_utf8_text_is_replaced() {
        let mut block = encode(&asha());
        // Latin-1 'é'
        block[14] = 0xE9;

        assert_eq!(decode(&block).unwrap().name(), "\u{FFFD}sha");
    }

    #[test]
    fn non_utf8_admission_number_is_rejected() {
        let mut block = encode(&asha());
        block[5] = 0xFF;

        assert!(matches!(
            decode(&block),
            Err(DecodeError::AdmissionNumber(_))
        ));
    }

    #[test]
    fn read_blocks_reports_trailing_bytes() {
        let mut bytes = Vec::new();
        write_blocks(&mut bytes, [&asha(), &asha()]).unwrap();
        bytes.extend_from_slice(&[1; 17]);

        let read = read_blocks(&mut Cursor::new(bytes), 100).unwrap();

        assert_eq!(read.blocks.len(), 2);
        assert_eq!(read.ignored, 0);
        assert_eq!(read.trailing_bytes, 17);
    }

    #[test]
    fn read_blocks_stops_keeping_at_limit() {
        let students = vec![asha(); 5];
        let mut bytes = Vec::new();
        let written = write_blocks(&mut bytes, &students).unwrap();
        assert_eq!(written, 5);

        let read = read_blocks(&mut Cursor::new(bytes), 3).unwrap();

        assert_eq!(read.blocks.len(), 3);
        assert_eq!(read.ignored, 2);
        assert_eq!(read.trailing_bytes, 0);
    }

    #[test]
    fn read_blocks_of_empty_input() {
        let read = read_blocks(&mut io::empty(), 100).unwrap();
        assert!(read.blocks.is_empty());
        assert_eq!(read.trailing_bytes, 0);
    }
}
