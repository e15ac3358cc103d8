use anyhow::Result;
use inquire::InquireError;

mod spinner;
mod style;

pub use spinner::Spinner;
pub use style::Style;

/// Result of an interactive prompt sequence.
#[derive(Debug, PartialEq, Eq)]
pub enum PromptOutcome<T> {
    Completed(T),
    /// The user pressed Escape or Ctrl+C.
    Cancelled,
}

const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Runs a sequence of prompts, turning a user cancellation into
/// [`PromptOutcome::Cancelled`]. Any other error is returned unchanged.
pub fn run_prompts<T>(prompts: impl FnOnce() -> Result<T>) -> Result<PromptOutcome<T>> {
    match prompts() {
        Ok(value) => Ok(PromptOutcome::Completed(value)),
        Err(e)
            if e.downcast_ref::<InquireError>()
                .is_some_and(is_prompt_cancelled) =>
        {
            // Leave the terminal on a fresh line after the aborted prompt.
            eprintln!();
            Ok(PromptOutcome::Cancelled)
        }
        Err(e) => Err(e),
    }
}
