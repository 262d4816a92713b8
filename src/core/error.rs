use thiserror::Error;

#[derive(Error, Debug)]
pub enum CadenzaError {
    #[error("Unknown recipe: {0}")]
    UnknownRecipe(String),

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Recipe file error: {0}")]
    RecipeParse(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CadenzaError>;
