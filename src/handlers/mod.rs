// src/handlers/mod.rs

pub mod admin;
pub mod auth;
pub mod houses;
pub mod owner;
pub mod profile;
pub mod reservations;
