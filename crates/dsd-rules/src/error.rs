use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rule set json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("empty child reference in rule '{parent}'")]
    EmptyReference { parent: String },
    #[error("cyclic rule chain: {chain}")]
    CyclicRule { chain: String },
    #[error("duplicate special rule name '{name}'")]
    DuplicateSpecialRule { name: String },
}

pub type Result<T> = std::result::Result<T, RuleError>;
