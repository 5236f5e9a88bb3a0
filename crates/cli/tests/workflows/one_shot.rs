//! One-shot commands through the real binary

use crate::common::{StubOutcome, TestSite};
use crate::sw;
use anyhow::Result;
use std::time::Duration;

#[test]
fn generate_runs_script_once() -> Result<()> {
    let site = TestSite::new(StubOutcome::Succeed, StubOutcome::Succeed);
    site.write_config(&site.config());

    let result = sw!(site.root(), "generate").run_ok()?;

    assert!(result.stdout_has("✅ Archivos HTML actualizados con éxito."));
    assert_eq!(site.runs("generate"), 1);
    Ok(())
}

#[test]
fn generate_failure_exits_non_zero() -> Result<()> {
    let site = TestSite::new(StubOutcome::Fail(1), StubOutcome::Succeed);
    site.write_config(&site.config());

    let result = sw!(site.root(), "generate").run_failing()?;

    assert!(result.stdout_has("❌ Error al generar HTML"));
    assert!(result.stderr_has("HTML generation failed"));
    Ok(())
}

#[test]
fn init_runs_initialization_script() -> Result<()> {
    let site = TestSite::new(StubOutcome::Succeed, StubOutcome::Succeed);
    site.write_config(&site.config());

    sw!(site.root(), "init").run_ok()?;

    assert_eq!(site.runs("initialize"), 1);
    assert_eq!(site.runs("generate"), 0);
    Ok(())
}

#[test]
fn explicit_config_path_is_used() -> Result<()> {
    let site = TestSite::new(StubOutcome::Succeed, StubOutcome::Succeed);
    let path = site.write_config(&site.config());
    let renamed = site.root().join("site.toml");
    std::fs::rename(&path, &renamed)?;

    let result = sw!(site.root(), "--config", "site.toml", "config").run_ok()?;

    assert!(result.stdout_has("site.toml"));
    assert!(result.stdout_has("generar.sh"));
    Ok(())
}

#[test]
fn config_without_file_shows_defaults() -> Result<()> {
    let site = TestSite::new(StubOutcome::Succeed, StubOutcome::Succeed);

    let result = sw!(site.root(), "config").run_ok()?;

    assert!(result.stdout_has("built-in defaults"));
    assert!(result.stdout_has("generar_html.py"));
    assert!(result.stdout_has("port = 5000"));
    Ok(())
}

#[test]
fn missing_explicit_config_fails() -> Result<()> {
    let site = TestSite::new(StubOutcome::Succeed, StubOutcome::Succeed);

    let result = sw!(site.root(), "--config", "nope.toml", "config").run_failing()?;

    assert!(result.stderr_has("nope.toml"));
    Ok(())
}

#[test]
fn serve_fails_fast_when_watched_directory_is_missing() -> Result<()> {
    let site = TestSite::new(StubOutcome::Succeed, StubOutcome::Succeed);
    let mut config = site.config();
    config.watch.files = vec![site.root().join("missing").join("proyectos.xlsx")];
    config.server.port = 1;
    site.write_config(&config);

    // Watch setup happens before binding, so this never reaches the port
    let result = sw!(site.root(), "serve")
        .env("RUST_LOG", "debug")
        .timeout(Duration::from_secs(10))
        .run_failing()?;

    assert!(result.stderr_has("Invalid watch.files"));
    assert!(result.duration < Duration::from_secs(10));
    assert_eq!(site.runs("generate"), 0);
    Ok(())
}
