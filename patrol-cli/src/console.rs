//! Interactive terminal presenter.

use colored::Colorize;
use patrol_game::{Presenter, SessionError};
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

/// Terminal presenter with optional slow-typed narration.
///
/// Input validation lives entirely here: a bad selection re-prompts without
/// the engine ever seeing it, so no state or entropy is consumed. A closed
/// input stream surfaces as [`SessionError::Interrupted`].
pub struct ConsolePresenter<R> {
    input: R,
    char_delay: Duration,
}

impl ConsolePresenter<io::StdinLock<'static>> {
    #[must_use]
    pub fn stdin(char_delay: Duration) -> Self {
        Self::new(io::stdin().lock(), char_delay)
    }
}

impl<R: BufRead> ConsolePresenter<R> {
    pub const fn new(input: R, char_delay: Duration) -> Self {
        Self { input, char_delay }
    }

    fn print_paced(&self, text: &str) {
        if self.char_delay.is_zero() {
            println!("{text}");
            return;
        }
        let mut stdout = io::stdout();
        for ch in text.chars() {
            print!("{ch}");
            let _ = stdout.flush();
            thread::sleep(self.char_delay);
        }
        println!();
    }

    fn read_entry(&mut self) -> Result<String, SessionError> {
        print!("> ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        match self.input.read_line(&mut buf) {
            Ok(0) | Err(_) => Err(SessionError::Interrupted),
            Ok(_) => Ok(buf.trim().to_string()),
        }
    }
}

impl<R: BufRead> Presenter for ConsolePresenter<R> {
    fn narrate(&mut self, line: &str) {
        self.print_paced(line);
    }

    fn choose(&mut self, prompt: &str, options: &[&str]) -> Result<usize, SessionError> {
        loop {
            self.print_paced(prompt);
            for (i, option) in options.iter().enumerate() {
                self.print_paced(&format!("  {}. {option}", i + 1));
            }
            let entry = self.read_entry()?;
            if let Ok(n) = entry.parse::<usize>()
                && (1..=options.len()).contains(&n)
            {
                return Ok(n - 1);
            }
            println!(
                "{}",
                "Enter the number of one of the listed options.".yellow()
            );
        }
    }

    fn prompt_line(&mut self, prompt: &str) -> Result<String, SessionError> {
        self.print_paced(prompt);
        self.read_entry()
    }
}
