pub mod chart;
pub mod config;
pub mod dates;
pub mod error;
pub mod model;
pub mod output;
pub mod paths;
pub mod store;
pub mod workbook;

pub use error::{GanttError, Result};
pub use model::{Activity, Status};
pub use store::{ActivityStore, ActivityUpdate};
