pub mod contend;
pub mod query;
pub mod walkthrough;
