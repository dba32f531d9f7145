pub mod meeting;
pub mod profile;
pub mod team;
pub mod user;
