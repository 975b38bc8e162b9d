//! Configuration, persona and request-scoped data types

pub mod config;
pub mod models;
pub mod persona;
