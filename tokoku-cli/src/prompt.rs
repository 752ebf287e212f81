//! Stdin prompting helpers and the interactive confirmation seam.

use std::io::{self, Write};
use tokoku::Confirm;

/// Read one trimmed line after printing a label.
pub fn line(label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Ask a yes/no question; only `y`/`ya` count as yes.
pub fn yes_no(question: &str) -> bool {
    match line(&format!("{} (y/n)", question)) {
        Ok(answer) => matches!(answer.to_lowercase().as_str(), "y" | "ya" | "yes"),
        Err(_) => false,
    }
}

/// [`Confirm`] implementation that prompts on stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        yes_no(prompt)
    }
}
