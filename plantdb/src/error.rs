use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlantDbError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate plant: '{species}' / '{variety}' is already in the collection")]
    Duplicate { species: String, variety: String },

    #[error("Plant not found: {id}")]
    NotFound { id: String },

    #[error("Import error: {0}")]
    Import(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlantDbError>;
