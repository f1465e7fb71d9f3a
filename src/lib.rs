//! notewalk - terminal tree browser for remote hierarchical note stores.
//!
//! The heart of the crate is [`tree`], the lazy materialization and patch
//! engine: it holds a partial copy of a potentially very large remote tree,
//! reveals target paths by sequential prefix fetches, merges the fetched
//! fragments without discarding loaded branches, and flattens the result
//! into decorated rows for linear display. [`store`] is the fetch boundary,
//! [`app`] and [`ui`] are the terminal front end on top.

pub mod app;
pub mod mode;
pub mod store;
pub mod tree;
pub mod ui;
