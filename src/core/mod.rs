pub mod error;
pub mod money;
pub mod window;

pub use error::{AppError, Result};
pub use window::ReportWindow;
