pub mod auth;
pub mod category;
pub mod page;
pub mod rango;
