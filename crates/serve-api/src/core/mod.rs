pub mod connection;
pub mod projection;
pub mod query;
pub mod types;
