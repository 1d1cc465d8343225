// src/models/mod.rs

pub mod analysis;
pub mod ask;
pub mod exam;
pub mod question;
pub mod subject;
