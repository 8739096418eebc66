#![warn(clippy::missing_docs_in_private_items)]

pub mod bounty;
pub mod factories;
pub mod validators;
