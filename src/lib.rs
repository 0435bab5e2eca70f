//! This crate lays down and validates the on-disk skeleton of a git-style
//! repository: the `.git` control directory, its fixed subdirectories, and
//! the `config` file that stamps the repository format version.
//!
//! Object storage, refs resolution, and diffing are not handled here. Higher
//! level operations are expected to start from a [`repo::Repository`]
//! returned by [`repo::Repository::open`] or [`repo::Repository::init`].

pub mod config;
pub mod path;
pub mod repo;

#[cfg(test)]
mod test_support;
