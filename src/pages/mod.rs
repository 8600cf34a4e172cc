//! Application pages

pub mod conversation;
pub mod conversations;
pub mod home;
pub mod login;
pub mod monitoring;
pub mod not_found;
pub mod settings;
