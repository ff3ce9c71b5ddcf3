use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, Context, Result};

use crate::git::remote::parse_github_remote;

const LOG_FORMAT: &str = "--pretty=format:%h;;%s;;%cr;;%an";

#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    pub hash: String,
    pub subject: String,
    pub date: String,
    pub author: String,
}

fn run_git(path: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .with_context(|| format!("running git {} in {}", args.join(" "), path.display()))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "git {} failed in {}: {}",
            args.join(" "),
            path.display(),
            stderr.trim()
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

pub fn current_branch(path: &Path) -> Result<String> {
    Ok(run_git(path, &["rev-parse", "--abbrev-ref", "HEAD"])?.trim().to_string())
}

pub fn last_commit(path: &Path) -> Result<Commit> {
    let out = run_git(path, &["log", LOG_FORMAT, "--abbrev-commit", "-1"])?;
    parse_commit_line(out.lines().next().unwrap_or_default())
}

pub fn github_repo(path: &Path) -> Result<(String, String)> {
    let out = run_git(path, &["remote", "-v"])?;
    parse_github_remote(&out).with_context(|| format!("resolving github remote of {}", path.display()))
}

fn parse_commit_line(line: &str) -> Result<Commit> {
    let parts: Vec<&str> = line.splitn(4, ";;").collect();
    match parts.as_slice() {
        [hash, subject, date, author] => Ok(Commit {
            hash: hash.to_string(),
            subject: subject.to_string(),
            date: date.to_string(),
            author: author.to_string(),
        }),
        _ => Err(anyhow!("unexpected git log line: {:?}", line)),
    }
}
