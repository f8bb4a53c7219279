pub mod criteria;
pub mod cache;
