pub mod commands;
pub mod config;
pub mod error;
pub mod state;
pub mod upstream;
pub mod web;
