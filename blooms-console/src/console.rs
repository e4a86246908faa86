use std::fmt::Display;
use std::io::{BufRead, Write};
use crate::error::{ConsoleError, ConsoleResult};

pub const WIDTH: usize = 60;

/// Line-oriented prompt/response I/O over any reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    pub fn say(&mut self, text: impl Display) -> ConsoleResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Print `label`, read one line and return it trimmed.
    pub fn prompt(&mut self, label: &str) -> ConsoleResult<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    /// Like [`prompt`](Self::prompt), upper-cased. Used for codes and Y/N answers.
    pub fn prompt_upper(&mut self, label: &str) -> ConsoleResult<String> {
        Ok(self.prompt(label)?.to_uppercase())
    }

    /// Re-prompt until the answer is one of `valid`.
    pub fn choose(&mut self, label: &str, valid: &[&str]) -> ConsoleResult<String> {
        loop {
            let answer = self.prompt(label)?;
            if valid.contains(&answer.as_str()) {
                return Ok(answer);
            }
            self.say(format!("⚠ Invalid option. Please choose from {}", valid.join(", ")))?;
        }
    }

    /// Numbered choice between `1..=count`, plus `0` when `allow_zero` is set.
    pub fn choose_number(&mut self, label: &str, count: usize, allow_zero: bool) -> ConsoleResult<usize> {
        let start = if allow_zero { 0 } else { 1 };
        let options: Vec<String> = (start..=count).map(|n| n.to_string()).collect();
        let valid: Vec<&str> = options.iter().map(String::as_str).collect();

        let answer = self.choose(label, &valid)?;
        Ok(answer.parse().unwrap_or(0))
    }

    pub fn pause(&mut self) -> ConsoleResult<()> {
        self.prompt("\nPress Enter to continue...")?;
        Ok(())
    }

    pub fn header(&mut self, title: &str) -> ConsoleResult<()> {
        let rule = "=".repeat(WIDTH);
        self.say(format!("\n{rule}\n{title:^WIDTH$}\n{rule}"))
    }

    pub fn rule(&mut self, width: usize) -> ConsoleResult<()> {
        self.say("-".repeat(width))
    }

    pub fn menu(&mut self, title: &str, options: &[(&str, &str)]) -> ConsoleResult<()> {
        self.header(title)?;
        for (key, label) in options {
            self.say(format!("{key}. {label}"))?;
        }
        self.rule(WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_parts().1).unwrap()
    }

    #[test]
    fn test_prompt_trims_and_detects_eof() {
        let mut console = console("  hello \n");
        assert_eq!(console.prompt("> ").unwrap(), "hello");
        assert!(matches!(console.prompt("> "), Err(ConsoleError::EndOfInput)));
    }

    #[test]
    fn test_choose_retries_until_valid() {
        let mut console = console("9\nx\n2\n");
        assert_eq!(console.choose("Enter option: ", &["1", "2"]).unwrap(), "2");

        let text = output(console);
        assert_eq!(text.matches("Invalid option").count(), 2);
    }

    #[test]
    fn test_choose_number_range() {
        let mut console = console("0\n3\n");
        assert_eq!(console.choose_number("Pick: ", 3, false).unwrap(), 3);

        let mut console = self::console("0\n");
        assert_eq!(console.choose_number("Pick: ", 3, true).unwrap(), 0);
    }

    #[test]
    fn test_menu_layout() {
        let mut console = console("");
        console.menu("MAIN", &[("1", "First"), ("2", "Second")]).unwrap();

        let text = output(console);
        assert!(text.contains("1. First\n2. Second\n"));
        assert!(text.contains(&"=".repeat(WIDTH)));
    }
}
