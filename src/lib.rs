pub mod aggregate;
pub mod analyze;
pub mod benchmark;
pub mod cli;
pub mod compare;
pub mod config;
pub mod dates;
pub mod error;
pub mod exclude;
pub mod git;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod util;
pub mod version;
