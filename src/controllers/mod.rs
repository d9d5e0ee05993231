pub mod health;
pub mod local;
pub mod synthesis;
