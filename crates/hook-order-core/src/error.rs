#[derive(thiserror::Error, Debug)]
pub enum LintError {
    #[error("Failed to load {language} grammar: {message}")]
    GrammarLoad {
        language: &'static str,
        message: String,
    },

    #[error("Parser produced no syntax tree for {language} source")]
    NoTree { language: &'static str },

    #[error("Unsupported file extension '{0}'")]
    UnsupportedExtension(String),
}
