//! File watcher dispatch against stub scripts

use crate::common::{StubOutcome, TestSite};
use cli_lib::{daemon, Jobs};
use std::time::Duration;

#[tokio::test]
async fn unwatched_file_changes_never_regenerate() {
    let site = TestSite::new(StubOutcome::Succeed, StubOutcome::Succeed);
    let config = site.config();
    let jobs = Jobs::from_config(&config);

    let change_watcher = daemon::start_watcher(&config, jobs.generate.clone()).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let other = site.sheet("notas.xlsx");
    std::fs::write(&other, b"one").unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    std::fs::write(&other, b"two").unwrap();

    assert!(!site.wait_for_runs("generate", 1, Duration::from_millis(750)).await);
    change_watcher.stop().unwrap();
}

#[tokio::test]
async fn burst_of_changes_regenerates_once() {
    let site = TestSite::new(StubOutcome::Succeed, StubOutcome::Succeed);
    let config = site.config();
    let watched = site.sheet("radicados.xlsx");
    std::fs::write(&watched, b"v0").unwrap();

    let jobs = Jobs::from_config(&config);
    let change_watcher = daemon::start_watcher(&config, jobs.generate.clone()).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    for i in 0..5 {
        std::fs::write(&watched, format!("v{}", i + 1)).unwrap();
    }

    assert!(site.wait_for_runs("generate", 1, Duration::from_secs(5)).await);
    // Remaining writes fall inside the default two second window
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(site.runs("generate"), 1);

    change_watcher.stop().unwrap();
}
