//! Project link → `owner/repo` resolution.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Matches `github.com/<owner>/<repo>` anywhere in a link.
static REPO_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/([^/?#]+)/([^/?#]+)").expect("repo link regex"));

/// A repository on GitHub, identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    /// Extract the repository a link points to.
    ///
    /// Matching is case-sensitive and a trailing `.git` is dropped from the
    /// repository name. Returns `None` for links that do not have the
    /// `github.com/<owner>/<repo>` shape.
    pub fn parse(link: &str) -> Option<Self> {
        let caps = REPO_LINK_RE.captures(link)?;
        let owner = caps.get(1)?.as_str();
        let repo = caps.get(2)?.as_str();
        let repo = repo.strip_suffix(".git").unwrap_or(repo);

        if repo.is_empty() {
            return None;
        }

        Some(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(link: &str) -> Option<(String, String)> {
        RepoRef::parse(link).map(|r| (r.owner, r.repo))
    }

    #[test]
    fn plain_repository_link() {
        assert_eq!(
            parse("https://github.com/rust-lang/cargo"),
            Some(("rust-lang".into(), "cargo".into()))
        );
    }

    #[test]
    fn strips_git_suffix() {
        assert_eq!(
            parse("https://github.com/tokio-rs/tokio.git"),
            Some(("tokio-rs".into(), "tokio".into()))
        );
    }

    #[test]
    fn ignores_trailing_path_query_and_fragment() {
        assert_eq!(
            parse("https://github.com/serde-rs/json/tree/master/src"),
            Some(("serde-rs".into(), "json".into()))
        );
        assert_eq!(
            parse("https://github.com/serde-rs/json?tab=readme"),
            Some(("serde-rs".into(), "json".into()))
        );
        assert_eq!(
            parse("https://github.com/serde-rs/json#readme"),
            Some(("serde-rs".into(), "json".into()))
        );
    }

    #[test]
    fn keeps_case() {
        assert_eq!(
            parse("https://github.com/BurntSushi/ripgrep"),
            Some(("BurntSushi".into(), "ripgrep".into()))
        );
    }

    #[test]
    fn rejects_other_shapes() {
        assert_eq!(parse("https://gitlab.com/x/y"), None);
        assert_eq!(parse("https://github.com/only-owner"), None);
        assert_eq!(parse("https://github.com/only-owner/"), None);
        assert_eq!(parse("https://GitHub.com/x/y"), None);
        assert_eq!(parse("https://github.com/x/.git"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn displays_as_owner_slash_repo() {
        let r = RepoRef::parse("git@github.com/x/y.git").unwrap();
        assert_eq!(r.to_string(), "x/y");
    }
}
