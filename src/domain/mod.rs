// Drift monitoring domain
pub mod monitoring;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
