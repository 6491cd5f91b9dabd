//! Chat relay pipeline and chat log persistence port.

pub mod relay;
pub mod repository;
