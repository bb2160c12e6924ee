//! Service configuration.

/// Recipe service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Populate the seed recipes at startup
    pub seed: bool,
    /// Bound of the handler to runtime request channel
    pub channel_capacity: usize,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Response timeout in milliseconds
    pub response_timeout_ms: u64,
    /// Time open connections get to finish in-flight requests on shutdown
    pub shutdown_timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            seed: true,
            channel_capacity: 1024,
            request_timeout_ms: 5000,   // 5 seconds default
            response_timeout_ms: 10000, // 10 seconds default
            shutdown_timeout_ms: 10000,
        }
    }
}
