use thiserror::Error;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("{construct} cannot be printed as {language}")]
    Unsupported {
        construct: String,
        language: &'static str,
    },
}

impl SyntaxError {
    pub fn unsupported(construct: impl Into<String>, language: &'static str) -> Self {
        Self::Unsupported {
            construct: construct.into(),
            language,
        }
    }
}
