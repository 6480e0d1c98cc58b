#![allow(dead_code)]

pub mod config;
pub mod mock_gcs;
pub mod mock_openai;
pub mod server;
