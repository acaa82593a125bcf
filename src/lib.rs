pub mod aggregate;
pub mod cli;
pub mod config;
pub mod dates;
pub mod descriptor;
pub mod formatters;
pub mod logging;
pub mod paths;
pub mod report;
pub mod resolver;
pub mod scan;
pub mod traversal;
pub mod types;
