use thiserror::Error;

/// Errors raised while canonicalizing input text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// Input was empty or whitespace only.
    #[error("input text is empty")]
    EmptyInput,

    /// Input has no character from the configured script's Unicode block.
    #[error("input contains no {script} characters (language '{language}')")]
    WrongScript {
        language: String,
        script: &'static str,
    },

    /// No normalizer exists for the language code.
    #[error("unsupported normalizer language: '{language}'")]
    UnsupportedLanguage { language: String },
}
