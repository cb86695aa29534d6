pub mod detector;
pub mod model;
pub mod transcript_service;
