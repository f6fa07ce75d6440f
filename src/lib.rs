//! `policy-docs` - policy catalog documentation generator
//!
//! Renders a YAML policy catalog (platform → namespace → policies) into
//! markdown in several layouts, and automates the Homebrew formula bump
//! that accompanies a release.

pub mod catalog;
pub mod cli;
pub mod docgen;
pub mod error;
pub mod observability;
pub mod release;
