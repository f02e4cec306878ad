use std::io::{self, BufRead, Write};

/// A source of operator input, one line at a time.
pub trait Prompt {
    /// Shows `message` and reads one line of input.
    ///
    /// The line terminator is not included. Returns `Ok(None)` when the input
    /// has ended.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the message or reading the line fails.
    fn ask(&mut self, message: &str) -> io::Result<Option<String>>;
}

/// A [`Prompt`] that writes messages to `W` and reads lines from `R`.
#[derive(Debug)]
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    /// Creates a prompt over the given reader and writer.
    #[must_use]
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LinePrompt<io::StdinLock<'static>, io::Stdout> {
    /// A prompt over the process's standard input and output.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self, message: &str) -> io::Result<Option<String>> {
        self.output.write_all(message.as_bytes())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// Asks repeatedly until `parse` accepts the answer.
///
/// Returns `Ok(None)` if the input ends first.
///
/// # Errors
///
/// Returns an error if the prompt fails.
pub fn ask_until<P, T, F>(prompt: &mut P, message: &str, mut parse: F) -> io::Result<Option<T>>
where
    P: Prompt + ?Sized,
    F: FnMut(&str) -> Option<T>,
{
    loop {
        let Some(answer) = prompt.ask(message)? else {
            return Ok(None);
        };
        if let Some(value) = parse(answer.trim()) {
            return Ok(Some(value));
        }
        tracing::debug!("Rejected input {answer:?}");
    }
}
