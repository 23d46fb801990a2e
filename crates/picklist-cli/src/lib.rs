//! Library side of the `picklist` binary: logging setup and the pipelines
//! behind each subcommand.

pub mod logging;
pub mod pipeline;
