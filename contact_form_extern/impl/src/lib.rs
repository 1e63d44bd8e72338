pub mod http;
pub mod submission;
