use anyhow::{anyhow, Result};
use regex::Regex;

/// Extracts `(owner, repo)` from `git remote -v` output, using the `origin`
/// remote in its SSH form `git@github.com:owner/repo.git`.
pub fn parse_github_remote(remotes: &str) -> Result<(String, String)> {
    let re = Regex::new(r"(?m)^origin\s+[^@\s]*@github\.com:([^/\s]+)/(\S+)")?;
    let caps = re
        .captures(remotes)
        .ok_or_else(|| anyhow!("not a github project"))?;
    let owner = caps[1].to_string();
    let repo = caps[2].strip_suffix(".git").unwrap_or(&caps[2]).to_string();
    if repo.is_empty() {
        return Err(anyhow!("not a github project"));
    }
    Ok((owner, repo))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ssh_remote() {
        let out = "origin\tgit@github.com:octocat/termitask.git (fetch)\n\
                   origin\tgit@github.com:octocat/termitask.git (push)\n";
        assert_eq!(
            parse_github_remote(out).unwrap(),
            ("octocat".to_string(), "termitask".to_string())
        );
    }

    #[test]
    fn test_parse_without_git_suffix() {
        let out = "origin\tgit@github.com:owner/repo (fetch)\n";
        assert_eq!(
            parse_github_remote(out).unwrap(),
            ("owner".to_string(), "repo".to_string())
        );
    }

    #[test]
    fn test_only_one_git_suffix_is_stripped() {
        let out = "origin\tgit@github.com:o/name.git.git (fetch)\n";
        assert_eq!(
            parse_github_remote(out).unwrap(),
            ("o".to_string(), "name.git".to_string())
        );
    }

    #[test]
    fn test_only_origin_counts() {
        let out = "upstream\tgit@github.com:other/fork.git (fetch)\n\
                   origin\tgit@github.com:me/fork.git (fetch)\n";
        assert_eq!(parse_github_remote(out).unwrap().0, "me");
    }

    #[test]
    fn test_non_github_remote() {
        assert!(parse_github_remote("origin\tgit@gitlab.com:a/b.git (fetch)\n").is_err());
        assert!(parse_github_remote("").is_err());
    }
}
