// Backend API access.

pub mod client;
