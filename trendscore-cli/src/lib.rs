//! TrendScore CLI library: CSV bar I/O and the subcommand bodies used by
//! the `trendscore` binary.

pub mod commands;
pub mod data;
