use std::{
    collections::VecDeque,
    io::{self, BufRead, Write},
    path::Path,
};

/// Where `print`/`println` write and where `input()` reads from.
///
/// `Stdio` talks to the process streams. `Buffer` captures output in memory
/// and serves `input()` from a queue of scripted lines, which is what tests
/// and embedders use.
///
/// ## Example
/// ```
/// use mava::interpreter::io::IoHandler;
///
/// let mut io = IoHandler::buffer_with_input(["first"]);
/// io.print("a").unwrap();
/// io.println("b").unwrap();
///
/// assert_eq!(io.output(), "ab\n");
/// assert_eq!(io.read_line().unwrap().as_deref(), Some("first"));
/// assert_eq!(io.read_line().unwrap(), None);
/// ```
#[derive(Debug)]
pub enum IoHandler {
    /// Standard output and standard input.
    Stdio,
    /// In-memory output with scripted input lines.
    Buffer {
        /// Everything printed so far.
        output: String,
        /// Lines still to be handed out by `input()`.
        input:  VecDeque<String>,
    },
}

impl Default for IoHandler {
    fn default() -> Self {
        Self::Stdio
    }
}

impl IoHandler {
    /// A handler bound to the process streams.
    #[must_use]
    pub const fn stdio() -> Self {
        Self::Stdio
    }

    /// A capturing handler with no scripted input.
    #[must_use]
    pub const fn buffer() -> Self {
        Self::Buffer { output: String::new(),
                       input:  VecDeque::new(), }
    }

    /// A capturing handler whose `input()` calls return `lines` in order.
    #[must_use]
    pub fn buffer_with_input<I, S>(lines: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self::Buffer { output: String::new(),
                       input:  lines.into_iter().map(Into::into).collect(), }
    }

    /// Writes `text` without a trailing newline.
    ///
    /// # Errors
    /// Fails if standard output cannot be written.
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        match self {
            Self::Stdio => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(text.as_bytes())?;
                stdout.flush()
            },
            Self::Buffer { output, .. } => {
                output.push_str(text);
                Ok(())
            },
        }
    }

    /// Writes `text` followed by a newline.
    ///
    /// # Errors
    /// Fails if standard output cannot be written.
    pub fn println(&mut self, text: &str) -> io::Result<()> {
        match self {
            Self::Stdio => writeln!(io::stdout().lock(), "{text}"),
            Self::Buffer { output, .. } => {
                output.push_str(text);
                output.push('\n');
                Ok(())
            },
        }
    }

    /// Reads one line without its line terminator.
    ///
    /// # Returns
    /// `None` once the input is exhausted.
    ///
    /// # Errors
    /// Fails if standard input cannot be read.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        match self {
            Self::Stdio => {
                let mut line = String::new();
                if io::stdin().lock().read_line(&mut line)? == 0 {
                    return Ok(None);
                }
                let trimmed = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed);
                Ok(Some(line))
            },
            Self::Buffer { input, .. } => Ok(input.pop_front()),
        }
    }

    /// Reads a whole file as a string.
    ///
    /// # Errors
    /// Fails if the file cannot be opened or is not valid UTF-8.
    pub fn read_file(&mut self, path: impl AsRef<Path>) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    /// Captured output. Always empty for `Stdio`.
    #[must_use]
    pub fn output(&self) -> &str {
        match self {
            Self::Stdio => "",
            Self::Buffer { output, .. } => output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_collects_print_and_println() {
        let mut io = IoHandler::buffer();
        io.print("1").unwrap();
        io.print("2").unwrap();
        io.println("").unwrap();
        io.println("3").unwrap();
        assert_eq!(io.output(), "12\n3\n");
    }

    #[test]
    fn stdio_captures_nothing() {
        assert_eq!(IoHandler::stdio().output(), "");
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut io = IoHandler::buffer();
        assert!(io.read_file("/definitely/not/here.mava").is_err());
    }
}
