pub mod media;
pub mod security;
pub mod session;
pub mod slug;
pub mod visits;
