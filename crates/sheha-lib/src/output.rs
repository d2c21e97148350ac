use std::io::{BufRead, Cursor, Stderr, StdinLock, Stdout, Write};

/// Console handles for a chat run.
///
/// Input is line-oriented (`BufRead`) so the chat loop can read one query per
/// line while writing replies between reads.
pub trait ConsoleIO<IN: BufRead, OUT: Write, ERR: Write> {
    fn stdin(&mut self) -> &mut IN;
    fn stdout(&mut self) -> &mut OUT;
    fn stderr(&mut self) -> &mut ERR;
}

/// Process stdin/stdout/stderr. Stdin stays locked for the lifetime of the value.
pub struct StdIO {
    stdin: StdinLock<'static>,
    stdout: Stdout,
    stderr: Stderr,
}

impl StdIO {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stdin: std::io::stdin().lock(),
            stdout: std::io::stdout(),
            stderr: std::io::stderr(),
        }
    }
}

impl Default for StdIO {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleIO<StdinLock<'static>, Stdout, Stderr> for StdIO {
    fn stdin(&mut self) -> &mut StdinLock<'static> {
        &mut self.stdin
    }

    fn stdout(&mut self) -> &mut Stdout {
        &mut self.stdout
    }

    fn stderr(&mut self) -> &mut Stderr {
        &mut self.stderr
    }
}

/// In-memory console: canned input, captured output.
#[derive(Default)]
pub struct BufferedIO {
    stdin: Cursor<Vec<u8>>,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl BufferedIO {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `lines` as stdin, one per line, each terminated by `\n`.
    #[must_use]
    pub fn with_stdin_lines(lines: &[&str]) -> Self {
        let mut data = Vec::new();
        for line in lines {
            data.extend_from_slice(line.as_bytes());
            data.push(b'\n');
        }
        Self {
            stdin: Cursor::new(data),
            ..Self::default()
        }
    }

    pub fn stdout_to_string(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_to_string(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

impl ConsoleIO<Cursor<Vec<u8>>, Vec<u8>, Vec<u8>> for BufferedIO {
    fn stdin(&mut self) -> &mut Cursor<Vec<u8>> {
        &mut self.stdin
    }

    fn stdout(&mut self) -> &mut Vec<u8> {
        &mut self.stdout
    }

    fn stderr(&mut self) -> &mut Vec<u8> {
        &mut self.stderr
    }
}
