//! The abstracted interface to an external revision-control fetcher. The
//! core defines the contract; a concrete implementation (typically
//! shelling out to `git`) lives in the install driver that consumes this
//! crate. See `satchel-cli` for a thin example that reports a plan without
//! executing one, since network transport is a non-goal of this crate.

use std::path::Path;

/// Materializes a plugin's source tree from a URL and optional reference.
///
/// Methods are `async fn`s because fetch is latency-bearing network I/O;
/// implementations are expected to suspend, not spin, while a clone or
/// checkout runs.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` at `git_ref` (branch, tag, or commit; `None` defaults to
    /// the repository's default branch) into `target_path`.
    async fn fetch(
        &self,
        url: &str,
        target_path: &Path,
        git_ref: Option<&str>,
    ) -> Result<(), FetchError>;
}

/// Failure modes an implementation of [`Fetcher`] may surface.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("authentication failed for {url}")]
    Authentication { url: String },

    #[error("no such reference {git_ref:?} for {url}")]
    NoSuchReference { url: String, git_ref: String },

    #[error("destination already exists: {}", path.display())]
    DestinationExists { path: std::path::PathBuf },

    #[error("I/O error fetching {url}: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// The basename after the last `/` or `:`, with a trailing `.git` removed.
pub fn extract_repo_name(url: &str) -> String {
    let tail = url
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(url);
    tail.strip_suffix(".git").unwrap_or(tail).to_string()
}

/// `true` iff `git_ref` starts with `v` followed by a digit.
pub fn is_tag(git_ref: &str) -> bool {
    let mut chars = git_ref.chars();
    matches!(chars.next(), Some('v')) && matches!(chars.next(), Some(c) if c.is_ascii_digit())
}

/// `true` iff `git_ref` is exactly 40 lowercase hexadecimal characters.
///
/// Abbreviated (short) commit hashes are deliberately classified as branch
/// names rather than commits, per the literal 40-character wording of the
/// reference-classification contract; anything shorter falls through to
/// "branch name" in the caller's own classification, which this function
/// does not attempt since it only answers the commit question.
pub fn is_commit(git_ref: &str) -> bool {
    git_ref.len() == 40 && git_ref.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
}
