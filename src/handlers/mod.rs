// src/handlers/mod.rs

pub mod analysis;
pub mod ask;
pub mod exam;
pub mod subjects;
