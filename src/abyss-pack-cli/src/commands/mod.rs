//! Command handlers for abyss-pack CLI

pub mod build;
pub mod verify;
