//! Built-in catalog adapters
//!
//! - `nyaa`: RSS search feed
//! - `tosho`: HTML listing pages

pub mod nyaa;
pub mod tosho;

pub use nyaa::NyaaAdapter;
pub use tosho::ToshoAdapter;
