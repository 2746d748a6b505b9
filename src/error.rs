use thiserror::Error;

/// Errors returned by the activity store, the chart renderer and the
/// workbook reader/writer.
#[derive(Debug, Error)]
pub enum GanttError {
    #[error("{0}")]
    Validation(String),
    #[error("invalid date '{0}': expected YYYY-MM-DD or DD/MM/YYYY")]
    InvalidDate(String),
    #[error("invalid status '{0}': must be NotStarted, InProgress, Completed, Delayed, or Paused")]
    InvalidStatus(String),
    #[error("duplicate activity id {0}")]
    DuplicateId(u32),
    #[error("workbook: {0}")]
    Workbook(String),
    #[error("failed to read workbook")]
    WorkbookRead(#[from] calamine::XlsxError),
    #[error("failed to write workbook")]
    WorkbookWrite(#[from] rust_xlsxwriter::XlsxError),
    #[error("failed to encode chart image")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GanttError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn workbook(msg: impl Into<String>) -> Self {
        Self::Workbook(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, GanttError>;
