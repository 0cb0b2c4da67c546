//! Integration tests for file-backed logging with an overridden clock.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use daylog_core::clock::OverridableClock;
use daylog_logger::{
    FileDestinationProvider, FlushPolicy, KeyZone, LogError, Logger, LoggerConfig, log_to,
};
use daylog_test_support::SteppingClock;
use tempfile::TempDir;

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// File name the reference harness expects for `secs`, computed directly
/// from the local calendar.
fn expected_file(secs: i64) -> String {
    format!(
        "sample_log_{}.log",
        at(secs).with_timezone(&Local).format("%Y_%m_%d")
    )
}

fn file_logger(dir: &Path) -> (Logger, Arc<OverridableClock>) {
    let clock = Arc::new(OverridableClock::new());
    let config = LoggerConfig::default().with_log_dir(dir);
    (Logger::from_config(&config, clock.clone()), clock)
}

fn log_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn test_hello_world_lands_in_dated_file() {
    let dir = TempDir::new().unwrap();
    let (logger, clock) = file_logger(dir.path());

    clock.set_override(at(1_000_000));
    log_to!(logger, "Hello ", String::from("world "), 123).unwrap();

    assert_eq!(log_files(dir.path()), vec![expected_file(1_000_000)]);
    let contents = fs::read_to_string(dir.path().join(expected_file(1_000_000))).unwrap();
    assert_eq!(contents, "Hello world 123\n");
}

#[test]
fn test_many_integer_fragments_form_one_line() {
    let dir = TempDir::new().unwrap();
    let (logger, clock) = file_logger(dir.path());
    clock.set_override(at(1_000_000));

    let digits: Vec<i32> = (0..100).map(|i| (i + 1) % 10).collect();
    let fragments: Vec<&dyn std::fmt::Display> =
        digits.iter().map(|d| d as &dyn std::fmt::Display).collect();
    logger.log(&fragments).unwrap();

    let lines = read_lines(&dir.path().join(expected_file(1_000_000)));
    assert_eq!(lines, vec!["1234567890".repeat(10)]);
}

#[test]
fn test_rollover_leaves_old_file_untouched() {
    let dir = TempDir::new().unwrap();
    let (logger, clock) = file_logger(dir.path());
    let first = 1_000_000;
    let next_day = first + 86_400;

    clock.set_override(at(first));
    log_to!(logger, "day one").unwrap();
    clock.set_override(at(next_day));
    log_to!(logger, "day two").unwrap();
    log_to!(logger, "day two again").unwrap();

    let old = dir.path().join(expected_file(first));
    let new = dir.path().join(expected_file(next_day));
    assert_ne!(old, new);
    assert_eq!(read_lines(&old), vec!["day one"]);
    assert_eq!(read_lines(&new), vec!["day two", "day two again"]);
}

#[test]
fn test_same_day_overrides_share_one_file() {
    let dir = TempDir::new().unwrap();
    let (logger, clock) = file_logger(dir.path());

    // Noon UTC on day 12 plus a few minutes stays inside one local day for
    // every zone within twelve hours of UTC.
    let noon = 11 * 86_400 + 12 * 3600;
    for step in 0..5 {
        clock.set_override(at(noon + step * 60));
        log_to!(logger, "step ", step).unwrap();
    }

    assert_eq!(log_files(dir.path()).len(), 1);
    let lines = read_lines(&dir.path().join(expected_file(noon)));
    assert_eq!(lines, vec!["step 0", "step 1", "step 2", "step 3", "step 4"]);
}

#[test]
fn test_reopening_appends_instead_of_truncating() {
    let dir = TempDir::new().unwrap();
    let (logger, clock) = file_logger(dir.path());
    clock.set_override(at(1_000_000));

    log_to!(logger, "first").unwrap();
    logger.shutdown().unwrap();
    log_to!(logger, "second").unwrap();

    let lines = read_lines(&dir.path().join(expected_file(1_000_000)));
    assert_eq!(lines, vec!["first", "second"]);
}

#[test]
fn test_buffered_lines_reach_disk_on_shutdown() {
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(OverridableClock::fixed_at(at(1_000_000)));
    let config = LoggerConfig::default()
        .with_log_dir(dir.path())
        .with_flush(FlushPolicy::OnRollover);
    let logger = Logger::from_config(&config, clock);

    log_to!(logger, "buffered").unwrap();
    logger.shutdown().unwrap();

    let lines = read_lines(&dir.path().join(expected_file(1_000_000)));
    assert_eq!(lines, vec!["buffered"]);
}

#[test]
fn test_stepped_clock_run_produces_every_line_in_order() {
    const ATTEMPTS: i64 = 100_000;

    let dir = TempDir::new().unwrap();
    let (logger, clock) = file_logger(dir.path());

    for i in 0..ATTEMPTS {
        clock.set_override(at(10_000_000 + i * 100));
        log_to!(logger, "Logging attempt ", i, ". ", "I Love it").unwrap();
    }
    logger.shutdown().unwrap();

    let files = log_files(dir.path());
    let mut expected_names: Vec<String> = (0..ATTEMPTS)
        .map(|i| expected_file(10_000_000 + i * 100))
        .collect();
    expected_names.dedup();
    assert_eq!(files, expected_names);

    // Timestamps only move forward, so date order is call order.
    let all: Vec<String> = files
        .iter()
        .flat_map(|name| read_lines(&dir.path().join(name)))
        .collect();
    assert_eq!(all.len(), 100_000);
    for (i, line) in all.iter().enumerate() {
        assert_eq!(line, &format!("Logging attempt {i}. I Love it"));
    }
}

#[test]
fn test_concurrent_threads_write_whole_lines() {
    const THREADS: usize = 8;
    const CALLS: usize = 1_000;

    let dir = TempDir::new().unwrap();
    let (logger, clock) = file_logger(dir.path());
    clock.set_override(at(1_000_000));
    let logger = Arc::new(logger);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..CALLS {
                    log_to!(logger, "thread ", t, " call ", i, " end").unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let lines = read_lines(&dir.path().join(expected_file(1_000_000)));
    assert_eq!(lines.len(), THREADS * CALLS);
    for t in 0..THREADS {
        let mine: Vec<&String> = lines
            .iter()
            .filter(|l| l.starts_with(&format!("thread {t} call ")))
            .collect();
        assert_eq!(mine.len(), CALLS);
        // Each thread's own lines keep their relative order.
        for (i, line) in mine.iter().enumerate() {
            assert_eq!(**line, format!("thread {t} call {i} end"));
        }
    }
}

#[test]
fn test_concurrent_threads_across_rollovers_keep_every_line() {
    const THREADS: usize = 8;
    const CALLS: usize = 2_000;

    let dir = TempDir::new().unwrap();
    // Every read moves the clock thirty minutes, so the run spans
    // 16 000 half hours starting at the epoch: 334 UTC days.
    let clock = Arc::new(SteppingClock::new(at(0), TimeDelta::minutes(30)));
    let provider = FileDestinationProvider::new(dir.path(), "sample_log_", "log");
    let logger =
        Arc::new(Logger::new(clock.clone(), Box::new(provider)).with_zone(KeyZone::Utc));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..CALLS {
                    log_to!(logger, "thread ", t, " call ", i, " end").unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    logger.shutdown().unwrap();

    let files = log_files(dir.path());
    assert_eq!(files.len(), 334);
    assert_eq!(files[0], "sample_log_1970_01_01.log");
    assert_eq!(clock.reads(), i64::try_from(THREADS * CALLS).unwrap());

    // The clock is read under the logger's lock, so date order is append
    // order and each thread's lines appear in the order it issued them.
    let all: Vec<String> = files
        .iter()
        .flat_map(|name| read_lines(&dir.path().join(name)))
        .collect();
    assert_eq!(all.len(), THREADS * CALLS);
    let mut next_call = vec![0_usize; THREADS];
    for line in &all {
        let rest = line.strip_prefix("thread ").unwrap();
        let (t, rest) = rest.split_once(" call ").unwrap();
        let (i, tail) = rest.split_once(' ').unwrap();
        assert_eq!(tail, "end");
        let t: usize = t.parse().unwrap();
        let i: usize = i.parse().unwrap();
        assert_eq!(i, next_call[t]);
        next_call[t] += 1;
    }
    assert!(next_call.iter().all(|&n| n == CALLS));
}

#[test]
fn test_missing_directory_is_an_open_error() {
    let dir = TempDir::new().unwrap();
    let (logger, clock) = file_logger(&dir.path().join("does-not-exist"));
    clock.set_override(at(1_000_000));

    let err = log_to!(logger, "lost").unwrap_err();

    assert!(matches!(err, LogError::DestinationOpen { .. }));
    assert_eq!(logger.current_key().unwrap(), None);
}

#[test]
fn test_create_dir_option_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("logs");
    let clock = Arc::new(OverridableClock::fixed_at(at(1_000_000)));
    let config = LoggerConfig::default()
        .with_log_dir(&nested)
        .with_create_dir(true);
    let logger = Logger::from_config(&config, clock);

    log_to!(logger, "created").unwrap();

    assert_eq!(read_lines(&nested.join(expected_file(1_000_000))), vec!["created"]);
}
