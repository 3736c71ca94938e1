use anyhow::{Context, Result};
use std::io::{BufRead, Write};


/// Blocking question-and-answer surface. Generic over the reader and
/// writer so tests can script the whole exchange with in-memory buffers.
pub struct Prompter<R, W> {
    input: R,
    pub(crate) output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Asks one question. Blank input resolves to the default when one is
    /// given; otherwise the blank line is returned as-is for the caller's
    /// validator to judge.
    pub fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String> {
        match default {
            Some(d) if !d.is_empty() => write!(self.output, "{} [{}]: ", question, d),
            _ => write!(self.output, "{}: ", question),
        }
        .context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush prompt")?;

        let answer = self.read_line()?;
        if answer.is_empty() {
            if let Some(d) = default {
                return Ok(d.to_string());
            }
        }
        Ok(answer)
    }

    /// Asks until the parser accepts the answer. Rejections print an
    /// inline error and re-prompt; they never abort the session.
    pub fn ask_until<T>(
        &mut self,
        question: &str,
        default: Option<&str>,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> Result<T> {
        loop {
            let raw = self.ask(question, default)?;
            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(reason) => self.status(&format!("error: {}", reason))?,
            }
        }
    }

    /// Yes/no question with a default. Anything other than a recognizable
    /// yes or no re-prompts.
    pub fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            write!(self.output, "{} [{}]: ", question, hint)
                .context("Failed to write prompt")?;
            self.output.flush().context("Failed to flush prompt")?;

            let answer = self.read_line()?.to_ascii_lowercase();
            match answer.as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.status("error: answer y or n")?,
            }
        }
    }

    /// Writes one status line to the interactive surface.
    pub fn status(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text).context("Failed to write status line")?;
        self.output.flush().context("Failed to flush status line")?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String> {
        let mut buf = String::new();
        let n = self
            .input
            .read_line(&mut buf)
            .context("Failed to read input")?;
        if n == 0 {
            anyhow::bail!("Input closed before the session finished");
        }
        Ok(buf.trim().to_string())
    }
}
