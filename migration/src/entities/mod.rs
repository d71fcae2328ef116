pub mod event;
pub mod inquiry;
pub mod lead;
pub mod recipe;
pub mod review;
pub mod store;
pub mod store_product;
pub mod traffic_log;
