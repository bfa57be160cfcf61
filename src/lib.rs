//! Bizdir - Business directory data loader
//!
//! Loads business records from a CSV asset, normalizing missing fields and
//! falling back to a built-in dataset when the asset cannot be read.

pub mod config;
pub mod data;
pub mod view;
