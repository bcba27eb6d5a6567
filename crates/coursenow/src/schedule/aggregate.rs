//! Combining per-file matches into one response.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use super::error::ScheduleError;
use super::loader::{list_course_files, load_course};
use super::matcher::match_course;
use super::types::{CurrentMoment, MatchedCourse};

/// How many course files are read at the same time.
pub const MAX_CONCURRENT_FILE_READS: usize = 4;

/// Concatenates per-file matches in the order given. Nothing is sorted or
/// deduplicated.
pub fn aggregate(per_file: Vec<Vec<MatchedCourse>>) -> Vec<MatchedCourse> {
    per_file.into_iter().flatten().collect()
}

/// Finds every course in `dir` that is in session at `now`.
///
/// Up to [`MAX_CONCURRENT_FILE_READS`] files are read at once and results
/// keep directory-listing order. A file that cannot be read or parsed within
/// `file_timeout` is logged and left out.
///
/// A timeout only stops waiting for the file. The underlying read runs on
/// tokio's blocking pool and keeps its thread until the OS returns.
///
/// # Arguments
/// * `dir` - The course data directory
/// * `now` - The moment to evaluate every meeting against
/// * `file_timeout` - Upper bound for reading and parsing one file
///
/// # Returns
/// * `Ok(Vec<MatchedCourse>)` - Matches from all readable files
/// * `Err` - If the directory cannot be listed
pub async fn collect_current_courses(
    dir: &Path,
    now: &CurrentMoment,
    file_timeout: Duration,
) -> Result<Vec<MatchedCourse>, ScheduleError> {
    let course_list = list_course_files(dir).await?;

    let loads: Vec<_> = course_list
        .iter()
        .map(|name| matches_for_file(dir, name, now, file_timeout))
        .collect();
    let per_file: Vec<Vec<MatchedCourse>> = stream::iter(loads)
        .buffered(MAX_CONCURRENT_FILE_READS)
        .collect()
        .await;

    let selected = aggregate(per_file);
    info!(
        "Selected {} current course(s) from {} file(s) for {} {}",
        selected.len(),
        course_list.len(),
        now.day_month(),
        now.at().format("%H:%M")
    );

    Ok(selected)
}

/// Loads and matches a single file. Failures are logged and yield no
/// matches.
async fn matches_for_file(
    dir: &Path,
    name: &str,
    now: &CurrentMoment,
    file_timeout: Duration,
) -> Vec<MatchedCourse> {
    let path = dir.join(format!("{name}.json"));
    match with_file_timeout(path, file_timeout, load_course(dir, name)).await {
        Ok(records) => match_course(&records, now),
        Err(e) => {
            warn!("Skipping course file {:?}: {}", name, e);
            Vec::new()
        }
    }
}

/// Bounds `load` by `timeout`, reporting an elapsed limit as
/// [`ScheduleError::Timeout`] for `path`.
async fn with_file_timeout<T, F>(
    path: PathBuf,
    timeout: Duration,
    load: F,
) -> Result<T, ScheduleError>
where
    F: Future<Output = Result<T, ScheduleError>>,
{
    match tokio::time::timeout(timeout, load).await {
        Ok(result) => result,
        Err(_) => Err(ScheduleError::Timeout { path, timeout }),
    }
}
