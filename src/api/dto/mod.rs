pub mod health;
pub mod redirect;
pub mod retrieve;
