pub mod emit;
pub mod error;
pub mod options;
pub mod scan;
pub mod snapshot;
