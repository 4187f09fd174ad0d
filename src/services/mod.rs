//! Services Layer
//!
//! Business logic called by the REST API handlers. Handlers stay thin and
//! only translate results into HTTP responses.
//!
//! # Architecture
//!
//! ```text
//! Dashboard --> REST API --> Services --> Sources --> OECD / World Bank
//! ```

pub mod macro_service;

pub use macro_service::MacroService;
