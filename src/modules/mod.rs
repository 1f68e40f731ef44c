pub mod notify;
pub mod reports;
