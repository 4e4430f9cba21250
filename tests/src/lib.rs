//! # Authz Test Suite
//!
//! Cross-crate tests that need the directory, both core services and the
//! gateway together.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # criterion: verify, authorize, base string
//! └── src/integration/
//!     ├── flows.rs      # Router-level flows over a seeded directory
//!     └── node.rs       # Full node on a real socket
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p authz-tests
//! cargo test -p authz-tests integration::flows
//!
//! # Benchmarks
//! cargo bench -p authz-tests
//! ```

pub mod integration;
