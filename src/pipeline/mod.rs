pub mod aggregate;
pub mod policy;
pub mod process;
