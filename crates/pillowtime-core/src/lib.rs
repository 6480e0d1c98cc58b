//! Types shared across the Pillowtime crates

mod http_client;
mod voice;

pub use http_client::http_client;
pub use voice::Voice;
