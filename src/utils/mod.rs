//! Text utilities shared by the aggregator and the CLI.

pub mod word_count;
