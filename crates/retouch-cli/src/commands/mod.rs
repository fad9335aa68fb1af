pub mod analyze;
pub mod auto;
pub mod config;
pub mod manual;
