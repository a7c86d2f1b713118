pub mod grid;
pub mod health;
pub mod session;
