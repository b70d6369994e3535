//! GitHub REST API access for repolens.
//!
//! - [`RepoRef`] resolves a project link to an `owner/repo` pair
//! - [`RepoResponse`] is the partial `/repos/{owner}/{repo}` payload and its
//!   conversion into fully populated [`repolens_shared::RepoStats`]
//! - [`GithubClient`] issues the lookups, never more than one at a time

mod client;
mod resolver;
mod response;

pub use client::GithubClient;
pub use resolver::RepoRef;
pub use response::{LicenseInfo, RepoResponse};
