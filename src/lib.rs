pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod state;
pub mod swipe;
pub mod web;
