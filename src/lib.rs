pub mod aggregate;
pub mod archive;
pub mod compare;
pub mod config;
pub mod family;
pub mod get_terminal_width;
pub mod improvement;
pub mod io_util;
pub mod key;
pub mod latency;
pub mod report;
pub mod results_file;
pub mod run_set;
pub mod stats;
pub mod tables;
pub mod utillib;
