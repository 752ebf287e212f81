//! Confirmation seam for destructive cart operations.
//!
//! Removing a line or clearing the whole cart asks the user first; the flows
//! take this trait so the CLI can prompt interactively while tests script
//! the answers.

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    /// Present `prompt` and return whether the user agreed.
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Confirms everything. For non-interactive use.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_confirmers() {
        let yes = |_: &str| true;
        let no = |_: &str| false;
        assert!(yes.confirm("sure?"));
        assert!(!no.confirm("sure?"));
        assert!(AlwaysConfirm.confirm("sure?"));
    }
}
