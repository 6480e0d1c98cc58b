//! Wire formats spoken by completion providers

pub mod openai;
