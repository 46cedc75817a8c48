//! Observability setup for TourMate.

pub mod tracing_setup;
