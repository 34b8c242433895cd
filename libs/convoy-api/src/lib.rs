pub mod candidate;
pub mod dispatch;
pub mod error;
pub mod key;
pub mod provider;
