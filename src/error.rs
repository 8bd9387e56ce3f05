use thiserror::Error;

use crate::state::prefs::StoreError;

/// Failures that stop the application from starting or running
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("user interface failed: {0}")]
    Ui(#[from] iced::Error),
}
