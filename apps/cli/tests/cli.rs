//! End-to-end checks of the `repolens` binary. None of these touch the network.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("repolens-cli-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Run the binary with an isolated HOME so no user config is picked up.
fn repolens(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_repolens"))
        .args(args)
        .env("HOME", home)
        .env_remove("REPOLENS_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("run repolens")
}

#[test]
fn enrich_with_unreadable_input_fails_without_output() {
    let tmp = temp_dir("missing-input");
    let output = tmp.join("processed-data.json");

    let out = repolens(
        &tmp,
        &[
            "enrich",
            "--input",
            tmp.join("nope.json").to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ],
    );

    assert!(!out.status.success());
    assert!(!output.exists());

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn enrich_with_unresolvable_links_writes_degraded_report() {
    let tmp = temp_dir("offline-enrich");
    let input = tmp.join("data.json");
    let output = tmp.join("processed-data.json");
    std::fs::write(
        &input,
        r#"[{"id": 1, "name": "A", "link": "https://example.com/a"},
            {"id": 2, "name": "B", "link": "not a link"}]"#,
    )
    .unwrap();

    let out = repolens(
        &tmp,
        &[
            "enrich",
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--delay-ms",
            "0",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(report["totalProjects"], 2);
    assert_eq!(report["projects"][0]["id"], 1);
    assert_eq!(report["projects"][1]["id"], 2);
    assert_eq!(report["projects"][1]["error"], "Invalid GitHub URL");
    assert_eq!(report["projects"][1]["language"], "N/A");

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn render_dry_run_prints_and_keeps_readme() {
    let tmp = temp_dir("render-dry-run");
    let input = tmp.join("data.json");
    let readme = tmp.join("README.md");
    std::fs::write(
        &input,
        r#"[{"id": 1, "name": "serde", "link": "https://github.com/serde-rs/serde"}]"#,
    )
    .unwrap();
    let original = "# List\n<!-- PROJECTS:START -->\n<!-- PROJECTS:END -->\n";
    std::fs::write(&readme, original).unwrap();

    let out = repolens(
        &tmp,
        &[
            "render",
            "--input",
            input.to_str().unwrap(),
            "--readme",
            readme.to_str().unwrap(),
            "--dry-run",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("| 1 | **serde** | [View Repo](https://github.com/serde-rs/serde) |"));
    assert_eq!(std::fs::read_to_string(&readme).unwrap(), original);

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn render_without_markers_fails() {
    let tmp = temp_dir("render-no-markers");
    let input = tmp.join("data.json");
    let readme = tmp.join("README.md");
    std::fs::write(&input, "[]").unwrap();
    std::fs::write(&readme, "# Nothing to replace\n").unwrap();

    let out = repolens(
        &tmp,
        &[
            "render",
            "--input",
            input.to_str().unwrap(),
            "--readme",
            readme.to_str().unwrap(),
        ],
    );

    assert!(!out.status.success());
    assert_eq!(
        std::fs::read_to_string(&readme).unwrap(),
        "# Nothing to replace\n"
    );

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn config_show_prints_defaults() {
    let tmp = temp_dir("config-show");

    let out = repolens(&tmp, &["config", "show"]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("api_base = \"https://api.github.com\""));
    assert!(stdout.contains("delay_ms = 1000"));

    let _ = std::fs::remove_dir_all(&tmp);
}
