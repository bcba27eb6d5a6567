//! Discovery and parsing of course files.

use std::path::Path;

use tokio::fs;
use tracing::{debug, warn};

use super::error::ScheduleError;
use super::types::CourseRecord;

const COURSE_FILE_EXTENSION: &str = "json";

/// Lists the course files in `dir`, returning their names without the
/// `.json` extension.
///
/// Names are returned in directory-listing order. Only regular files (or
/// symlinks to them) ending in `.json` are listed. FIFOs, sockets and
/// devices are skipped since reading them can block forever.
///
/// # Arguments
/// * `dir` - Directory holding one JSON file per course subject
///
/// # Returns
/// * `Ok(Vec<String>)` - File stems, e.g. `["MATH101", "CS50"]`
/// * `Err` - If the directory itself cannot be read
pub async fn list_course_files(dir: &Path) -> Result<Vec<String>, ScheduleError> {
    let dir_err = |source: std::io::Error| ScheduleError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir).await.map_err(dir_err)?;
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(dir_err)? {
        let path = entry.path();

        if path.extension().and_then(|s| s.to_str()) != Some(COURSE_FILE_EXTENSION) {
            debug!("Ignoring non-course entry {}", path.display());
            continue;
        }

        // Follows symlinks, unlike `entry.file_type()`
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                debug!("Ignoring {}: not a regular file", path.display());
                continue;
            }
            Err(e) => {
                warn!("Ignoring {}: {}", path.display(), e);
                continue;
            }
        }

        match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => names.push(stem.to_string()),
            None => debug!("Ignoring {}: file name is not valid UTF-8", path.display()),
        }
    }

    Ok(names)
}

/// Reads and parses `<dir>/<name>.json` into course records.
pub async fn load_course(dir: &Path, name: &str) -> Result<Vec<CourseRecord>, ScheduleError> {
    let path = dir.join(format!("{name}.{COURSE_FILE_EXTENSION}"));
    debug!("Reading course file {}", path.display());

    let content = fs::read_to_string(&path)
        .await
        .map_err(|source| ScheduleError::FileRead {
            path: path.clone(),
            source,
        })?;

    serde_json::from_str(&content).map_err(|source| ScheduleError::Parse { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;

    #[tokio::test]
    async fn test_list_course_files_strips_extension() {
        let dir = tempfile::tempdir().unwrap();
        std_fs::write(dir.path().join("MATH101.json"), "[]").unwrap();
        std_fs::write(dir.path().join("CS50.json"), "[]").unwrap();
        std_fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();
        std_fs::create_dir(dir.path().join("archive.json")).unwrap();

        let mut names = list_course_files(dir.path()).await.unwrap();
        names.sort();
        assert_eq!(names, vec!["CS50", "MATH101"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_list_skips_special_files_and_follows_symlinks() {
        use std::os::unix::net::UnixListener;

        let dir = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        std_fs::write(dir.path().join("MATH101.json"), "[]").unwrap();
        std_fs::write(data.path().join("real.json"), "[]").unwrap();
        std::os::unix::fs::symlink(data.path().join("real.json"), dir.path().join("LINKED.json"))
            .unwrap();
        std::os::unix::fs::symlink(data.path().join("gone.json"), dir.path().join("DANGLING.json"))
            .unwrap();
        let status = std::process::Command::new("mkfifo")
            .arg(dir.path().join("SLOW.json"))
            .status()
            .unwrap();
        assert!(status.success());
        let _socket = UnixListener::bind(dir.path().join("SOCKET.json")).unwrap();

        let mut names = list_course_files(dir.path()).await.unwrap();
        names.sort();
        assert_eq!(names, vec!["LINKED", "MATH101"]);
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_list_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        std_fs::write(dir.path().join("MATH101.json"), "[]").unwrap();
        std_fs::write(dir.path().join(OsStr::from_bytes(b"bad\xff.json")), "[]").unwrap();

        assert_eq!(list_course_files(dir.path()).await.unwrap(), vec!["MATH101"]);
    }

    #[tokio::test]
    async fn test_list_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = list_course_files(&missing).await.unwrap_err();
        assert!(matches!(err, ScheduleError::DirectoryRead { .. }));
        assert!(err.is_request_fatal());
    }

    #[tokio::test]
    async fn test_load_course_parses_records() {
        let dir = tempfile::tempdir().unwrap();
        std_fs::write(
            dir.path().join("PHYS110.json"),
            r#"[{
                "course_title": "Mechanics",
                "class_code": "PHYS110-01",
                "meeting_date": ["15/03, 22/03"],
                "period": ["Class 09:00AM - 10:30AM"],
                "room": ["Hall 3"],
                "staff": "Dr. Ortiz",
                "quota": 60,
                "mode": "F2F",
                "units": 4
            }]"#,
        )
        .unwrap();

        let records = load_course(dir.path(), "PHYS110").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Mechanics");
        assert_eq!(records[0].meeting_date_tokens(), vec!["15/03", "22/03"]);
    }

    #[tokio::test]
    async fn test_load_course_errors() {
        let dir = tempfile::tempdir().unwrap();
        std_fs::write(dir.path().join("BROKEN.json"), "[{ not json").unwrap();
        std_fs::write(dir.path().join("OBJECT.json"), r#"{"course_title": "x"}"#).unwrap();

        assert!(matches!(
            load_course(dir.path(), "BROKEN").await,
            Err(ScheduleError::Parse { .. })
        ));
        assert!(matches!(
            load_course(dir.path(), "OBJECT").await,
            Err(ScheduleError::Parse { .. })
        ));
        assert!(matches!(
            load_course(dir.path(), "MISSING").await,
            Err(ScheduleError::FileRead { .. })
        ));
    }
}
