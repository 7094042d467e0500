pub mod algorithms;
pub mod sink;
pub mod streaming;
