//! Assistant integration surface
//!
//! The language-model round trip itself lives outside this crate. What it
//! needs from the engine is here: a text briefing of a snapshot, the
//! `issue_orders` tool schema and translation of tool calls into ordinary
//! order submissions.

pub mod briefing;
pub mod tools;

pub use briefing::{render_map, Briefing};
pub use tools::{apply_tool_call, issue_orders_tool, ToolOrderOutcome, ISSUE_ORDERS};
