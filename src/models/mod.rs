// src/models/mod.rs

pub mod house;
pub mod reservation;
pub mod room;
pub mod user;
