//! Arena DOM - the node model queried by the `query` crate
//!
//! ## Philosophy
//!
//! - **Good taste**: Data structures first, algorithms follow naturally
//! - **No special cases**: Every relation is a `NodeId`, navigation is O(1)
//! - **Cache friendly**: Arena allocation, sequential access patterns
//!
//! ## Core Design
//!
//! ```text
//! DevTools JSON → DomService → DomArena (owned) → query::Set (borrowed ids)
//!                                   ↓
//!                            NodeId (u32) links
//! ```

pub mod arena;
pub mod error;
pub mod service;
pub mod types;

pub use arena::DomArena;
pub use error::{DomError, Result};
pub use service::{DomService, DomServiceConfig};
pub use types::*;
