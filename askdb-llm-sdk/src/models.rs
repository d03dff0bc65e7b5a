//! Model constants for supported LLM providers
//!
//! Model IDs are sourced from official provider documentation.

/// Groq model constants
pub mod groq {
    /// Llama 3 8B - fast default model for text-to-SQL translation
    pub const LLAMA3_8B: &str = "llama3-8b-8192";

    /// Default model used when no model is configured
    pub const DEFAULT: &str = LLAMA3_8B;
}
