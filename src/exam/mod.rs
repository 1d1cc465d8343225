// src/exam/mod.rs

pub mod builder;
pub mod session;
pub mod store;
