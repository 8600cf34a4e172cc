//! Reusable UI components

pub mod header;
pub mod loading;
pub mod message_content;

pub use header::Header;
pub use loading::{ErrorBanner, LoadingSpinner, Skeleton};
pub use message_content::MessageContent;
