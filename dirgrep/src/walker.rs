//! Directory traversal: the producer side of the work queue.

use ignore::WalkBuilder;
use std::path::Path;
use tracing::debug;

use crate::filters::NameFilter;
use crate::queue::BoundedPathQueue;
use crate::status::SharedStatus;

/// Recursively enumerates regular files under `root` and feeds them into the
/// queue, applying the optional filename filter.
///
/// Entries that are not regular files are skipped silently. A failure to
/// read any single entry is recorded as the shared status's last error and
/// the walk continues. Whatever happens, the queue is marked finished on
/// return so the workers terminate.
pub fn produce(
    root: &Path,
    name_filter: Option<&NameFilter>,
    queue: &BoundedPathQueue,
    status: &SharedStatus,
) {
    let walk = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build();

    let mut enqueued = 0usize;
    for entry in walk {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    continue;
                }
                if let Some(filter) = name_filter {
                    let name = entry.file_name().to_string_lossy();
                    if !filter.matches(&name) {
                        continue;
                    }
                }
                if !queue.push(entry.into_path()) {
                    // Queue was closed out from under us; stop producing.
                    break;
                }
                enqueued += 1;
            }
            Err(err) => status.record_error(format!("Error reading an entry: {err}")),
        }
    }

    debug!("Directory walk complete, {enqueued} files enqueued");
    queue.mark_finished();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn drain(queue: &BoundedPathQueue) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        while let Some(path) = queue.pop() {
            paths.push(path);
        }
        paths.sort();
        paths
    }

    #[test]
    fn test_enumerates_nested_regular_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "x").unwrap();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        fs::write(dir.path().join("sub/b.rs"), "y").unwrap();
        fs::write(dir.path().join("sub/deeper/c.txt"), "z").unwrap();

        let queue = BoundedPathQueue::new(100);
        let status = SharedStatus::new();
        produce(dir.path(), None, &queue, &status);

        let paths = drain(&queue);
        assert_eq!(paths.len(), 3);
        assert!(queue.is_finished());
        assert!(status.snapshot().last_error.is_none());
    }

    #[test]
    fn test_directories_are_not_enqueued() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("only/dirs/here")).unwrap();

        let queue = BoundedPathQueue::new(100);
        let status = SharedStatus::new();
        produce(dir.path(), None, &queue, &status);

        assert!(drain(&queue).is_empty());
    }

    #[test]
    fn test_name_filter_applied_case_insensitively() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("keep.TXT"), "x").unwrap();
        fs::write(dir.path().join("keep2.txt"), "x").unwrap();
        fs::write(dir.path().join("skip.rs"), "x").unwrap();

        let filter = NameFilter::new("*.txt").unwrap();
        let queue = BoundedPathQueue::new(100);
        let status = SharedStatus::new();
        produce(dir.path(), Some(&filter), &queue, &status);

        let paths = drain(&queue);
        assert_eq!(paths.len(), 2);
        assert!(paths
            .iter()
            .all(|p| p.file_name().unwrap().to_string_lossy().to_lowercase().ends_with(".txt")));
    }

    #[test]
    fn test_missing_root_records_error_and_finishes() {
        let queue = BoundedPathQueue::new(100);
        let status = SharedStatus::new();
        produce(Path::new("/definitely/not/a/real/root"), None, &queue, &status);

        assert!(queue.is_finished());
        assert!(drain(&queue).is_empty());
        assert!(status.snapshot().last_error.is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_file_is_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("real.txt"), "x").unwrap();
        std::os::unix::fs::symlink(dir.path().join("real.txt"), dir.path().join("link.txt"))
            .unwrap();

        let queue = BoundedPathQueue::new(100);
        let status = SharedStatus::new();
        produce(dir.path(), None, &queue, &status);

        // With follow_links off the symlink's file_type is a symlink, not a
        // regular file.
        let paths = drain(&queue);
        assert_eq!(paths.len(), 1);
        assert!(paths[0].ends_with("real.txt"));
    }
}
