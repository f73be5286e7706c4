// GitHub API module.
// Provides the HTTP client, the `RepoApi` seam, and wire types.

#![allow(dead_code)]

pub mod client;
pub mod endpoints;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use client::GitHubClient;
pub use endpoints::{PAGE_SIZE, RepoApi};
pub use types::*;
