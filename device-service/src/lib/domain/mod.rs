pub mod device;
pub mod role;
pub mod user;
