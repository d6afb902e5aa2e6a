use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};

/// Boundary between the game engine and the terminal. The engine only ever
/// reads whole lines and writes whole strings; everything else (prompts
/// without trailing newlines, flushing) lives behind this trait.
pub trait Console {
    /// Read one line of input, printing `prompt` first when given. The
    /// returned string carries no trailing newline. Closed input is an
    /// error: there is nobody left to re-prompt.
    fn read_line(&mut self, prompt: Option<&str>) -> Result<String>;

    /// Write without a newline, flushed so prompts appear before the read.
    fn write(&mut self, text: &str) -> Result<()>;

    fn write_line(&mut self, text: &str) -> Result<()>;
}

/// The real thing: stdin/stdout.
pub struct Terminal {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }
}

impl Console for Terminal {
    fn read_line(&mut self, prompt: Option<&str>) -> Result<String> {
        if let Some(msg) = prompt {
            self.write(msg)?;
        }
        let mut line = String::new();
        let read = self
            .stdin
            .lock()
            .read_line(&mut line)
            .context("reading from stdin")?;
        if read == 0 {
            bail!("input closed");
        }
        while line.ends_with(['\n', '\r']) {
            line.pop();
        }
        Ok(line)
    }

    fn write(&mut self, text: &str) -> Result<()> {
        write!(self.stdout, "{text}")?;
        self.stdout.flush().context("flushing stdout")?;
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        writeln!(self.stdout, "{text}")?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::Script;
    use super::Console;

    #[test]
    fn script_returns_lines_in_order() {
        let mut console = Script::new(["0 0", "1 2"]);
        assert_eq!(console.read_line(None).unwrap(), "0 0");
        assert_eq!(console.read_line(None).unwrap(), "1 2");
    }

    #[test]
    fn script_captures_prompt_before_line() {
        let mut console = Script::new(["yes"]);
        console.read_line(Some("Restart? (yes/no): ")).unwrap();
        assert_eq!(console.output, ["Restart? (yes/no): "]);
    }

    #[test]
    fn exhausted_script_is_an_error() {
        let mut console = Script::new([]);
        assert!(console.read_line(None).is_err());
    }
}
