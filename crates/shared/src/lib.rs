pub mod commands;
pub mod protocol;
