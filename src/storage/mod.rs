pub mod backend;
pub mod models;

pub use backend::{SeaOrmStorage, TrafficSink};
pub use models::*;
