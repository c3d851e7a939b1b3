// Common test utilities and fixtures

pub mod helpers;

// Re-export commonly used items
// Note: each test binary uses a different subset
#[allow(unused_imports)]
pub use fixtures::{mcp_docs, DocsDir};
#[allow(unused_imports)]
pub use helpers::{offline_config, static_services, MockHttpServer, StaticSource};
