//! The impls and functions
//!
use log::*;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use crate::errors::PluginError;
use crate::snapshot::StoredCounter;
use crate::stats::{parse_counter, StatsSnapshot};

/// Derive the snapshot file path for a connection target.
///
/// The path combines the invoking user's uid with host and port under the
/// system temporary directory, so different targets polled by the same user
/// never collide, and a rerun against the same target reuses the same file.
pub fn snapshot_path(
    host: &str,
    port: u16,
) -> PathBuf
{
    let uid = unsafe { libc::getuid() };
    env::temp_dir().join(format!("{}-mcd-stats-{}-{}", uid, host, port))
}

pub fn exists(
    path: &Path,
) -> bool
{
    path.exists()
}

/// Write the snapshot as tab-separated `name<TAB>count` records, one per
/// line, replacing any previous file.
///
/// The records go to a temporary sibling first and are renamed over the
/// target, so a concurrent run reading the file never observes a partial
/// write.
pub fn save(
    path: &Path,
    snapshot: &StatsSnapshot,
) -> Result<(), PluginError>
{
    let temp_path = path.with_file_name(format!("{}.tmp", path.file_name().unwrap_or_default().to_string_lossy()));
    let file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| PluginError::io(format!("failed to save stats: {}", temp_path.display()), e))?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(file);
    for (name, count) in &snapshot.counters {
        writer.serialize(StoredCounter { name: name.clone(), count: *count })
            .map_err(|e| PluginError::io(format!("failed to save stats: {}", temp_path.display()), csv_into_io(e)))?;
    }
    writer.flush()
        .map_err(|e| PluginError::io(format!("failed to save stats: {}", temp_path.display()), e))?;
    drop(writer);
    fs::rename(&temp_path, path)
        .map_err(|e| PluginError::io(format!("failed to save stats: {}", path.display()), e))?;
    debug!("snapshot saved: {}", path.display());
    Ok(())
}

/// Read a snapshot back from its tab-separated file.
///
/// Quoting is disabled so a stray double quote in the file is read as a
/// literal character rather than starting a quoted field. A record whose
/// count field is missing or non-numeric fails the load.
pub fn load(
    path: &Path,
) -> Result<StatsSnapshot, PluginError>
{
    let file = fs::File::open(path)
        .map_err(|e| PluginError::io(format!("failed to load previous stats: {}", path.display()), e))?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(file);
    let mut snapshot = StatsSnapshot::new();
    for row in reader.records() {
        let record = row
            .map_err(|e| PluginError::io(format!("failed to load previous stats: {}", path.display()), csv_into_io(e)))?;
        let name = record.get(0)
            .ok_or_else(|| PluginError::Parse(format!("snapshot record without a name field: {}", path.display())))?;
        let raw_count = record.get(1)
            .ok_or_else(|| PluginError::Parse(format!("snapshot record {:?} without a count field: {}", name, path.display())))?;
        let count = parse_counter(raw_count)
            .map_err(|e| PluginError::Parse(format!("snapshot record {:?} with non-numeric count {:?}: {}", name, raw_count, e)))?;
        snapshot.counters.insert(name.to_string(), count);
    }
    Ok(snapshot)
}

fn csv_into_io(error: csv::Error) -> std::io::Error {
    match error.into_kind() {
        csv::ErrorKind::Io(e) => e,
        other => std::io::Error::new(std::io::ErrorKind::InvalidData, format!("{:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn scratch_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("mcd-stats-test-{}-{}", std::process::id(), name))
    }

    #[test]
    fn unit_save_load_roundtrip() {
        let path = scratch_path("roundtrip");
        let mut snapshot = StatsSnapshot::new();
        snapshot.counters.insert("cmd_get".to_string(), 100);
        snapshot.counters.insert("cmd_set".to_string(), 0);
        snapshot.set_capture_time(1700000000);

        save(&path, &snapshot).unwrap();
        let loaded = load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn unit_save_overwrites_previous_file() {
        let path = scratch_path("overwrite");
        let mut first = StatsSnapshot::new();
        first.counters.insert("bytes".to_string(), 1);
        first.counters.insert("evictions".to_string(), 2);
        save(&path, &first).unwrap();

        let mut second = StatsSnapshot::new();
        second.counters.insert("bytes".to_string(), 9);
        save(&path, &second).unwrap();

        let loaded = load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded, second);
    }

    #[test]
    fn unit_load_tolerates_unescaped_quotes() {
        let path = scratch_path("quotes");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"cmd_get\t10\nodd\"name\t20\n_time_\t1700000000\n").unwrap();
        drop(file);

        let loaded = load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded.get("cmd_get"), 10);
        assert_eq!(loaded.get("odd\"name"), 20);
        assert_eq!(loaded.capture_time(), 1700000000);
    }

    #[test]
    fn unit_load_rejects_non_numeric_count() {
        let path = scratch_path("nonnumeric");
        fs::write(&path, b"cmd_get\tmany\n").unwrap();
        let result = load(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(PluginError::Parse(_))));
    }

    #[test]
    fn unit_load_missing_file_is_io_error() {
        let result = load(&scratch_path("does-not-exist"));
        assert!(matches!(result, Err(PluginError::Io { .. })));
    }

    #[test]
    fn unit_snapshot_path_distinct_per_target_and_stable_per_rerun() {
        assert_ne!(snapshot_path("localhost", 11211), snapshot_path("localhost", 11212));
        assert_ne!(snapshot_path("cache-a", 11211), snapshot_path("cache-b", 11211));
        assert_eq!(snapshot_path("localhost", 11211), snapshot_path("localhost", 11211));
    }
}
