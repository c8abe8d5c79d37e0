mod processing_service;

pub use processing_service::{ProcessingError, ProcessingResult, ProcessingService};
