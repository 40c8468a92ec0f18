use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Timelapse(#[from] timelapser::Error),

    #[error("Cannot serialize report: {0}")]
    Report(#[from] serde_json::Error),

    #[error("Invalid progress template: {0}")]
    Progress(#[from] indicatif::style::TemplateError),
}
