pub mod mapping;
pub mod teams;
pub mod timing;
