pub mod batch;
pub mod logging;
pub mod profile_file;
pub mod report;
