// src/api/http/mod.rs

pub mod feed;
pub mod handlers;
mod router;

pub use router::http_router;
