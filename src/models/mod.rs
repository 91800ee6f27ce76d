pub mod category;
pub mod page;
pub mod user;
