pub mod bound;
pub mod direct;
pub mod resolve;
pub mod table;

#[cfg(test)]
mod fixtures;
