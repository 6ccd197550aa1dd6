// src/models/mod.rs

pub mod attempt;
pub mod group;
pub mod question;
pub mod session;
