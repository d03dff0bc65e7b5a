pub mod client;
pub mod types;

pub use client::GroqClient;
pub use types::*;
