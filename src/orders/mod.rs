//! Unit orders: the wire schema, validation and per-unit queues

pub mod order;
pub mod queue;

pub use order::{Order, OrderRequest, TargetRequest};
pub use queue::{ensure_commandable, ensure_commandable_by, submit, OrderReceipt};
