pub mod audit;
pub mod entities;
pub mod health;
