//! Stock control for the Quatro Cantos engine.
//!
//! The reconciler applies entries and exits to a [`ProductRepository`].
//! Two stores are provided: an in-memory one for tests and dry runs, and a
//! SQLite one for the CLI.

mod memory;
mod reconciler;
mod repository;
mod sqlite;

pub use memory::InMemoryProductRepository;
pub use reconciler::{
    InboundBatch, InboundEntry, InboundReceipt, OutboundOutcome, OutboundStatus, Sale,
    SkippedEntry, list_products, register_inbound, register_inbound_batch, register_outbound,
    stock_value,
};
pub use repository::ProductRepository;
pub use sqlite::SqliteProductRepository;
