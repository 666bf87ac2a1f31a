use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const PILOT: &str = "Title: Pilot\nAuthor: A. Writer\n\nINT. KITCHEN - DAY\n\nBOB\nHello.\n\nEXT. YARD - NIGHT\n\nALICE\nBye.\n";

fn run_slugline(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_slugline"))
        .args(args)
        .output()
        .expect("Failed to run slugline binary")
}

fn write_script(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_stdout_count_mode() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_script(temp_dir.path(), "pilot.fountain", PILOT);

    let output = run_slugline(&["--stdout", "--mode", "count", script.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["scenes"], 2);
    assert!(!temp_dir.path().join("pilot.fountain_slugline.json").exists());
}

#[test]
fn test_directory_run_writes_sidecars_and_stats() {
    let temp_dir = TempDir::new().unwrap();
    write_script(temp_dir.path(), "pilot.fountain", PILOT);
    write_script(temp_dir.path(), "drafts/short.spmd", "EXT. ROAD - DAY\n\nCars pass.\n");
    write_script(temp_dir.path(), "notes.txt", "INT. IGNORED - DAY\n");
    let stats_path = temp_dir.path().join("stats.json");

    let output = run_slugline(&[
        "--mode",
        "scenes",
        "--no-progress",
        "--stats-out",
        stats_path.to_str().unwrap(),
        temp_dir.path().to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let sidecar = std::fs::read_to_string(temp_dir.path().join("pilot.fountain_slugline.json")).unwrap();
    let scenes: serde_json::Value = serde_json::from_str(&sidecar).unwrap();
    assert_eq!(scenes.as_array().unwrap().len(), 2);
    assert_eq!(scenes[0]["location"], "KITCHEN");
    assert_eq!(scenes[1]["characters"], serde_json::json!(["ALICE"]));

    assert!(temp_dir.path().join("drafts/short.spmd_slugline.json").exists());
    assert!(!temp_dir.path().join("notes.txt_slugline.json").exists());

    let stats: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&stats_path).unwrap()).unwrap();
    assert_eq!(stats["files_processed"], 2);
    assert_eq!(stats["files_failed"], 0);
}

#[test]
fn test_invalid_discovered_path_is_recorded_as_failed() {
    let temp_dir = TempDir::new().unwrap();
    write_script(temp_dir.path(), "pilot.fountain", PILOT);
    // A directory with a screenplay extension matches discovery but is not a file
    std::fs::create_dir_all(temp_dir.path().join("broken.fountain")).unwrap();
    let stats_path = temp_dir.path().join("stats.json");

    let output = run_slugline(&[
        "--no-progress",
        "--stats-out",
        stats_path.to_str().unwrap(),
        temp_dir.path().to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stats: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&stats_path).unwrap()).unwrap();
    assert_eq!(stats["files_processed"], 1);
    assert_eq!(stats["files_failed"], 1);

    let failed: Vec<&serde_json::Value> = stats["files"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|f| f["status"] == "failed")
        .collect();
    assert_eq!(failed.len(), 1);
    assert!(failed[0]["path"].as_str().unwrap().ends_with("broken.fountain"));
    assert!(failed[0]["error"].as_str().unwrap().contains("not a file"));
}

#[test]
fn test_same_stem_screenplays_both_indexed() {
    let temp_dir = TempDir::new().unwrap();
    write_script(temp_dir.path(), "pilot.fountain", "INT. A - DAY\n\nQuiet.\n");
    write_script(temp_dir.path(), "pilot.spmd", PILOT);
    let stats_path = temp_dir.path().join("stats.json");

    let output = run_slugline(&[
        "--mode",
        "count",
        "--no-progress",
        "--stats-out",
        stats_path.to_str().unwrap(),
        temp_dir.path().to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let read_count = |name: &str| -> serde_json::Value {
        serde_json::from_str(&std::fs::read_to_string(temp_dir.path().join(name)).unwrap()).unwrap()
    };
    assert_eq!(read_count("pilot.fountain_slugline.json")["scenes"], 1);
    assert_eq!(read_count("pilot.spmd_slugline.json")["scenes"], 2);

    let stats: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&stats_path).unwrap()).unwrap();
    assert_eq!(stats["files_processed"], 2);
    assert_eq!(stats["files_skipped"], 0);
}

#[test]
fn test_second_run_skips_unless_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_script(temp_dir.path(), "pilot.fountain", PILOT);
    let stats_path = temp_dir.path().join("stats.json");
    let script_arg = script.to_str().unwrap();
    let stats_arg = stats_path.to_str().unwrap();

    assert!(run_slugline(&["--no-progress", script_arg]).status.success());

    let output = run_slugline(&["--no-progress", "--stats-out", stats_arg, script_arg]);
    assert!(output.status.success());
    let stats: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&stats_path).unwrap()).unwrap();
    assert_eq!(stats["files_skipped"], 1);

    let output = run_slugline(&["--no-progress", "--overwrite-all", "--stats-out", stats_arg, script_arg]);
    assert!(output.status.success());
    let stats: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&stats_path).unwrap()).unwrap();
    assert_eq!(stats["files_processed"], 1);
    assert_eq!(stats["files"][0]["scenes"], 2);
    assert_eq!(stats["files"][0]["characters"], 2);
}

#[test]
fn test_document_sidecar_carries_title() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_script(temp_dir.path(), "pilot.fountain", PILOT);

    let output = run_slugline(&["--no-progress", script.to_str().unwrap()]);
    assert!(output.status.success());

    let document: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp_dir.path().join("pilot.fountain_slugline.json")).unwrap()).unwrap();
    assert_eq!(document["title"]["title"], "Pilot");
    assert_eq!(document["tokens"][3]["type"], "scene-heading");
    assert_eq!(document["characters"], serde_json::json!(["ALICE", "BOB"]));
}

#[test]
fn test_extra_stop_flag() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_script(temp_dir.path(), "card.fountain", "INT. HALL - DAY\n\nCHYRON\nThree years later.\n");

    let output = run_slugline(&["--stdout", "--extra-stop", "chyron", script.to_str().unwrap()]);
    assert!(output.status.success());
    let document: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(document["tokens"][2]["type"], "action");
    assert_eq!(document["characters"], serde_json::json!([]));
}

#[test]
fn test_missing_input_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_slugline(&[temp_dir.path().join("absent.fountain").to_str().unwrap()]);
    assert!(!output.status.success());
}
