//! Hierarchical diagnostic message formatter.
//!
//! A [`TreeFormatter`] replays a depth-first visit onto a tree of labeled nodes and renders it
//! as an indented plain text block.
//!
//! ```
//! use diagtree::TreeFormatter;
//!
//! let mut formatter = TreeFormatter::new();
//! formatter.node("Could not resolve all dependencies")?;
//! formatter.start_children()?;
//! formatter.node("Could not find foo")?;
//! formatter.node("Could not find bar")?;
//! formatter.end_children()?;
//!
//! assert_eq!(
//!     formatter.to_string(),
//!     "Could not resolve all dependencies:\n  - Could not find foo\n  - Could not find bar"
//! );
//! # diagtree::Result::Ok(())
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub use self::{
    config::{FormatterConfig, FormatterConfigBuilder, LineSeparator},
    tree_formatter::{Error, ProtocolViolation, Result, TreeFormatter},
};

mod config;
mod line_writer;
mod render;
mod tree;
mod tree_formatter;
pub mod value;
