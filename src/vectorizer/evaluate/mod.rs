pub mod classify;
pub mod scoring;
