//! Git output parsing helpers.

use std::process::Output;

use crate::smart::{ChangeVerb, ChangedFiles};

/// Formats a git error with both stdout and stderr for better debugging.
pub fn format_git_error(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();

    match (stderr.is_empty(), stdout.is_empty()) {
        (true, true) => format!(
            "Command failed with exit code {}",
            output.status.code().unwrap_or(-1)
        ),
        (true, false) => stdout,
        (false, true) => stderr,
        (false, false) => format!("{}\n{}", stderr, stdout),
    }
}

/// Parses `git diff --name-status` output.
///
/// Renames and copies carry two paths; the source of a rename counts as
/// deleted and the destination as added.
pub fn parse_name_status(output: &str) -> ChangedFiles {
    let mut files = ChangedFiles::new();

    for line in output.lines() {
        let mut fields = line.split('\t');
        let Some(status) = fields.next().and_then(|s| s.chars().next()) else {
            continue;
        };
        let paths: Vec<&str> = fields.filter(|p| !p.is_empty()).collect();

        match (status, paths.as_slice()) {
            ('R', [from, to]) => {
                files.insert(unquote(from), ChangeVerb::Deleted);
                files.insert(unquote(to), ChangeVerb::Added);
            }
            ('C', [_, to]) => files.insert(unquote(to), ChangeVerb::Added),
            (_, [path]) => files.insert(unquote(path), ChangeVerb::from_status_code(status)),
            _ => {}
        }
    }

    files
}

/// Parses `git status --porcelain` (v1) output.
pub fn parse_porcelain(output: &str) -> ChangedFiles {
    let mut files = ChangedFiles::new();

    for line in output.lines() {
        if line.len() < 4 || line.starts_with("##") {
            continue;
        }
        let index_status = line.chars().next().unwrap_or(' ');
        let worktree_status = line.chars().nth(1).unwrap_or(' ');
        let file_path = &line[3..];

        // Handle renamed files (format: "R  old -> new")
        if let Some((from, to)) = file_path.split_once(" -> ") {
            files.insert(unquote(from), ChangeVerb::Deleted);
            files.insert(unquote(to), ChangeVerb::Added);
            continue;
        }

        let status = if line.starts_with("??") {
            '?'
        } else if worktree_status == 'D' {
            'D'
        } else if index_status != ' ' {
            index_status
        } else if worktree_status != ' ' {
            worktree_status
        } else {
            continue;
        };

        files.insert(unquote(file_path), ChangeVerb::from_status_code(status));
    }

    files
}

/// Re-roots repository-relative paths at `prefix`, the output of
/// `git rev-parse --show-prefix`. Paths outside the prefix are dropped.
pub fn strip_prefix(files: ChangedFiles, prefix: &str) -> ChangedFiles {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return files;
    }
    let prefix = format!("{}/", prefix.trim_end_matches('/'));

    files
        .into_iter()
        .filter_map(|(path, verb)| {
            path.strip_prefix(prefix.as_str())
                .filter(|rest| !rest.is_empty())
                .map(|rest| (rest.to_string(), verb))
        })
        .collect()
}

/// Strips the quotes git puts around paths with unusual characters.
fn unquote(path: &str) -> String {
    let path = path.trim();
    path.strip_prefix('"')
        .and_then(|p| p.strip_suffix('"'))
        .unwrap_or(path)
        .to_string()
}
