pub mod submission_log;
pub mod time;
