//! Provider name constants
//!
//! This module defines canonical provider names used throughout the SDK

/// Groq provider (hosted Llama models, OpenAI-compatible API)
pub const GROQ: &str = "groq";
