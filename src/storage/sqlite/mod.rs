//! SQLite implementation of the summary sink.

mod summary_sink;

pub use summary_sink::SqliteSummarySink;
