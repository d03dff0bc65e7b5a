//! # askdb LLM SDK
//!
//! A small LLM client SDK for askdb, currently backed by Groq's
//! OpenAI-compatible chat completions API.
//!
//! ## Example
//!
//! ```rust,no_run
//! use askdb_llm_sdk::client::LlmClient;
//! use askdb_llm_sdk::groq::GroqClient;
//! use askdb_llm_sdk::types::{CompletionRequest, Message};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GroqClient::new("your-groq-api-key")?;
//!     let response = client
//!         .complete(CompletionRequest {
//!             messages: vec![Message::user("Hello, Groq!")],
//!             max_tokens: 1024,
//!             model: askdb_llm_sdk::models::groq::LLAMA3_8B.to_string(),
//!             system: None,
//!             temperature: None,
//!             top_p: None,
//!             stop_sequences: None,
//!         })
//!         .await?;
//!
//!     println!("Response: {}", response.text());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod groq;
pub mod models;
pub mod providers;
pub mod types;
