//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod env_settings;
mod in_memory_club_repository;

pub use env_settings::{club_settings_from, load_club_settings};
pub use in_memory_club_repository::InMemoryClubRepository;
