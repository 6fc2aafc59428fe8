//! # gridline-cli
//!
//! Command-line front end for [`gridline`]: export rows through a table
//! definition, or inspect the column layout a definition produces.
//!
//! ```bash
//! gridline export --table people.yaml --rows people.json --format csv --out exports/
//! gridline export -t people.yaml -r people.csv -f text --page 2 --page-size 25
//! gridline layout --table people.yaml -o json
//! ```

pub mod cli;
pub mod commands;
pub mod logging;

pub use cli::Cli;
pub use commands::run;
