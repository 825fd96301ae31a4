use std::io::{BufRead, Write};

/// Asks whether one entry's counter should be reset.
pub trait Confirm {
    fn ask(&mut self, entry_name: &str, current_value: &str) -> bool;
}

/// Accepts every entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn ask(&mut self, _entry_name: &str, _current_value: &str) -> bool {
        true
    }
}

impl<F> Confirm for F
where
    F: FnMut(&str, &str) -> bool,
{
    fn ask(&mut self, entry_name: &str, current_value: &str) -> bool {
        self(entry_name, current_value)
    }
}

/// Line-based y/n prompt. Only `y` (any case, surrounding whitespace ignored)
/// accepts; end of input, a read error or a failed write declines.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for Prompt<R, W> {
    fn ask(&mut self, entry_name: &str, current_value: &str) -> bool {
        let shown = write!(
            self.output,
            "Torrent: {}\n  Current uploaded: {}\n  Reset uploaded amount? (y/n): ",
            entry_name, current_value
        )
        .and_then(|_| self.output.flush());
        // never act on an answer to a question that was not shown
        if shown.is_err() {
            return false;
        }

        let mut line = String::new();
        let accepted = match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => false,
            Ok(_) => line.trim().eq_ignore_ascii_case("y"),
        };

        let trailer = if accepted {
            writeln!(self.output)
        } else {
            writeln!(self.output, "  Skipped.\n")
        };
        accepted && trailer.is_ok()
    }
}
