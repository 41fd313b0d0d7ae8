use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to load comments CSV: {0}")]
    Load(String),

    #[error("comments CSV is missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("no comments found for teacher `{0}`")]
    TeacherNotFound(String),

    #[error("sentiment classifier failed: {0}")]
    Classifier(String),

    #[error("classifier returned star rating {0}, expected a value from 1 to 5")]
    InvalidRating(u8),
}

impl From<csv::Error> for AnalysisError {
    fn from(err: csv::Error) -> Self {
        AnalysisError::Load(err.to_string())
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        AnalysisError::Classifier(err.to_string())
    }
}
