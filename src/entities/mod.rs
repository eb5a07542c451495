pub mod session;
pub mod show;
pub mod user;
