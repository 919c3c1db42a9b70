pub mod commands;
pub mod monitor;
pub mod os;
