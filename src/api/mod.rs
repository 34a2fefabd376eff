pub mod analytics;
pub mod upload;
