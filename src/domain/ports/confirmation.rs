//! Confirmation Port
//!
//! Yes/no questions asked during generation (e.g. "the output directory is not
//! under source control, continue?"). Implementations can be interactive or
//! answer automatically.

/// Trait for asking the user a yes/no question.
///
/// Implementations can be:
/// - `DialoguerConfirmer`: prompts on the terminal
/// - `AssumeYes`: `--yes` and unattended runs
/// - `AssumeNo`: non-interactive runs without `--yes`
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &str, default: bool) -> bool;
}

/// Always answers yes
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&self, _prompt: &str, _default: bool) -> bool {
        true
    }
}

/// Always answers no
pub struct AssumeNo;

impl Confirmer for AssumeNo {
    fn confirm(&self, _prompt: &str, _default: bool) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_answers() {
        assert!(AssumeYes.confirm("continue?", false));
        assert!(!AssumeNo.confirm("continue?", true));
    }
}
