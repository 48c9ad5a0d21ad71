//! Core IR and pass pipeline for the ClientScript decompiler back end.
//!
//! Upstream stages hand over functions whose bodies are already structured
//! into [`ir::Construct`] trees. This crate owns those types, the symbol
//! lookups used to render them, and the pre-emission transform passes.

pub mod error;
pub mod ir;
pub mod names;
pub mod pipeline;
pub mod transforms;
