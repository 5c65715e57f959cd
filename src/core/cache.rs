//! File system helpers for the raw sheet cache and the output directory
//!
//! Raw sheets are cached as `{prefix}__{tab}.json`, with the tab name kept in
//! its URL-encoded form so the file names match what the fetch step requests.
//! Outputs are staged next to their final path and renamed into place only
//! after every file has been staged.

use std::{
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

/// URL-encode a sheet tab name the way the Sheets API path expects it.
pub fn encode_tab(tab: &str) -> String {
    tab.replace(' ', "%20")
}

/// Path: {dir}/{prefix}__{encoded tab}.json
pub fn raw_sheet_path(dir: &Path, prefix: &str, tab: &str) -> PathBuf {
    dir.join(format!("{}__{}.json", prefix, encode_tab(tab)))
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Write every file to a `*.tmp` sibling. On failure nothing staged is left behind.
fn stage_all(files: &[(PathBuf, String)]) -> std::io::Result<Vec<(PathBuf, &Path)>> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(files.len());

    for (path, contents) in files {
        let tmp = sibling_path(path, ".tmp");
        if let Err(e) = write_string(&tmp, contents) {
            let _ = fs::remove_file(&tmp);
            for (tmp, _) in &staged {
                let _ = fs::remove_file(tmp);
            }
            return Err(e);
        }
        staged.push((tmp, path.as_path()));
    }
    Ok(staged)
}

/// Move staged files over their targets. Existing targets are kept as `*.bak`
/// until every move has gone through; if one fails, the new files are removed
/// and the backups put back.
fn commit_staged<F>(staged: &[(PathBuf, &Path)], mut rename: F) -> std::io::Result<()>
where
    F: FnMut(&Path, &Path) -> std::io::Result<()>,
{
    let mut backups: Vec<(PathBuf, &Path)> = Vec::new();
    let mut committed: Vec<&Path> = Vec::new();
    let mut failure = None;

    for (tmp, path) in staged {
        let path: &Path = path;
        if path.exists() {
            let backup = sibling_path(path, ".bak");
            if let Err(e) = rename(path, backup.as_path()) {
                failure = Some(e);
                break;
            }
            backups.push((backup, path));
        }
        debug!("writing {}", path.display());
        if let Err(e) = rename(tmp.as_path(), path) {
            failure = Some(e);
            break;
        }
        committed.push(path);
    }

    match failure {
        None => {
            for (backup, _) in &backups {
                let _ = fs::remove_file(backup);
            }
            Ok(())
        }
        Some(e) => {
            for path in &committed {
                let _ = fs::remove_file(path);
            }
            for (backup, path) in &backups {
                let _ = fs::rename(backup, path);
            }
            for (tmp, _) in staged {
                let _ = fs::remove_file(tmp);
            }
            Err(e)
        }
    }
}

/// Write every `(path, contents)` pair, or none of them.
///
/// All files are first written to `*.tmp` siblings, then moved over their
/// targets. If staging or any move fails, the staged files are removed and
/// the previous targets are restored.
pub fn write_all_or_nothing(files: &[(PathBuf, String)]) -> std::io::Result<()> {
    let staged = stage_all(files)?;
    commit_staged(&staged, |from, to| fs::rename(from, to))
}
