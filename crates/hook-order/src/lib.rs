pub mod discovery;
pub mod lint;
pub mod report;
