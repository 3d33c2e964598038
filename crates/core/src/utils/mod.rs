//! Pure helpers shared by core services

pub mod canonicalize;
