pub mod aggregation;
pub mod services;
pub mod session;
pub mod time;
pub mod utils;
