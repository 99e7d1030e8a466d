pub mod dataset;
pub mod fetch;
pub mod output;
pub mod stats;
pub mod summary;
