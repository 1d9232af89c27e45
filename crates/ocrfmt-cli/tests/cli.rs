use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ocrfmt(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ocrfmt").unwrap();
    cmd.arg("--config").arg(config_dir.path().join("config.json"));
    cmd
}

fn init(config_dir: &TempDir) {
    ocrfmt(config_dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));
}

#[test]
fn resolves_date_time_before_date() {
    let dir = TempDir::new().unwrap();
    init(&dir);

    ocrfmt(&dir)
        .args(["resolve", "12/31/2020 10:00", "--field", "timestamp"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""kind": "date_time""#))
        .stdout(predicate::str::contains("2020-12-31T10:00:00"));
}

#[test]
fn falls_back_to_raw_text() {
    let dir = TempDir::new().unwrap();
    init(&dir);

    ocrfmt(&dir)
        .args(["resolve", "not a number", "--field", "number"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""kind": "raw_text""#))
        .stdout(predicate::str::contains(r#""format": null"#));
}

#[test]
fn resolves_selected_part() {
    let dir = TempDir::new().unwrap();
    init(&dir);

    ocrfmt(&dir)
        .args(["resolve", "Total: $1,234.50", "--field", "amount", "--select", "$1,234.50"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""kind": "currency""#))
        .stdout(predicate::str::contains("1234.5"));
}

#[test]
fn locale_seeds_pinned_formats() {
    let dir = TempDir::new().unwrap();
    init(&dir);

    ocrfmt(&dir)
        .args(["resolve", "12,5", "--field", "number", "--locale", "de-DE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12.5"));

    ocrfmt(&dir)
        .args(["resolve", "12.5", "--field", "number", "--locale", "de-DE"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""kind": "raw_text""#));
}

#[test]
fn rejects_bad_pin() {
    let dir = TempDir::new().unwrap();
    init(&dir);

    ocrfmt(&dir)
        .args(["resolve", "1", "--field", "number", "--pin", "money=1"])
        .assert()
        .failure();

    ocrfmt(&dir)
        .args(["resolve", "1", "--field", "number", "--pin", "number=100000"])
        .assert()
        .failure();
}

#[test]
fn lists_formats_with_automatic_first() {
    let dir = TempDir::new().unwrap();
    init(&dir);

    ocrfmt(&dir)
        .args(["formats", "--category", "number", "--locales"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Automatic"))
        .stdout(predicate::str::contains("-12,345.987"))
        .stdout(predicate::str::contains("en-US"));
}

#[test]
fn lists_formats_as_json() {
    let dir = TempDir::new().unwrap();
    init(&dir);

    let output = ocrfmt(&dir)
        .args(["formats", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    for category in ["number", "percent", "currency", "date", "time", "date_time"] {
        assert!(listing[category].as_array().is_some_and(|formats| !formats.is_empty()));
    }
}

#[test]
fn lists_locales() {
    let dir = TempDir::new().unwrap();

    ocrfmt(&dir)
        .args(["locales"])
        .assert()
        .success()
        .stdout(predicate::str::contains("en-US"))
        .stdout(predicate::str::contains("pl-PL"));
}

#[test]
fn config_set_and_get() {
    let dir = TempDir::new().unwrap();
    init(&dir);

    ocrfmt(&dir)
        .args(["config", "set", "formats.locale", "fr-FR"])
        .assert()
        .success();

    ocrfmt(&dir)
        .args(["config", "get", "formats.locale"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fr-FR"));

    ocrfmt(&dir)
        .args(["config", "set", "formats.nonexistent", "1"])
        .assert()
        .failure();
}

#[test]
fn config_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    init(&dir);

    ocrfmt(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();

    ocrfmt(&dir)
        .args(["resolve", "1", "--field", "number"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}
