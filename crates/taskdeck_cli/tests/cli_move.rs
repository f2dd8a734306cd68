use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_data_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("taskdeck-{nanos}-{name}"))
}

fn write_store(dir: &Path, tasks: serde_json::Value) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(
        dir.join("todos.json"),
        serde_json::to_string_pretty(&tasks).unwrap(),
    )
    .unwrap();
}

fn read_texts(dir: &Path) -> Vec<String> {
    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("todos.json")).unwrap()).unwrap();
    stored
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["text"].as_str().unwrap().to_string())
        .collect()
}

fn seed_three(dir: &Path) {
    write_store(
        dir,
        serde_json::json!([
            { "text": "A", "completed": false, "priority": "Low" },
            { "text": "B", "completed": false, "priority": "Medium" },
            { "text": "C", "completed": false, "priority": "High" }
        ]),
    );
}

#[test]
fn up_command_swaps_with_the_previous_task() {
    let exe = env!("CARGO_BIN_EXE_taskdeck");
    let data_dir = temp_data_dir("up");
    seed_three(&data_dir);

    let output = Command::new(exe)
        .args(["up", "2"])
        .env("TASKDECK_DATA_DIR", &data_dir)
        .output()
        .expect("failed to run up command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Moved task up: B"));

    let texts = read_texts(&data_dir);
    std::fs::remove_dir_all(&data_dir).ok();
    assert_eq!(texts, ["B", "A", "C"]);
}

#[test]
fn down_command_swaps_with_the_next_task() {
    let exe = env!("CARGO_BIN_EXE_taskdeck");
    let data_dir = temp_data_dir("down");
    seed_three(&data_dir);

    let output = Command::new(exe)
        .args(["down", "1"])
        .env("TASKDECK_DATA_DIR", &data_dir)
        .output()
        .expect("failed to run down command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Moved task down: A"));

    let texts = read_texts(&data_dir);
    std::fs::remove_dir_all(&data_dir).ok();
    assert_eq!(texts, ["B", "A", "C"]);
}

#[test]
fn up_command_on_first_task_is_a_no_op() {
    let exe = env!("CARGO_BIN_EXE_taskdeck");
    let data_dir = temp_data_dir("up-top");
    seed_three(&data_dir);

    let output = Command::new(exe)
        .args(["up", "1"])
        .env("TASKDECK_DATA_DIR", &data_dir)
        .output()
        .expect("failed to run up command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("already at the top"));

    let texts = read_texts(&data_dir);
    std::fs::remove_dir_all(&data_dir).ok();
    assert_eq!(texts, ["A", "B", "C"]);
}

#[test]
fn down_command_on_last_task_is_a_no_op() {
    let exe = env!("CARGO_BIN_EXE_taskdeck");
    let data_dir = temp_data_dir("down-bottom");
    seed_three(&data_dir);

    let output = Command::new(exe)
        .args(["down", "3"])
        .env("TASKDECK_DATA_DIR", &data_dir)
        .output()
        .expect("failed to run down command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("already at the bottom"));

    let texts = read_texts(&data_dir);
    std::fs::remove_dir_all(&data_dir).ok();
    assert_eq!(texts, ["A", "B", "C"]);
}

#[test]
fn up_command_rejects_out_of_range_position() {
    let exe = env!("CARGO_BIN_EXE_taskdeck");
    let data_dir = temp_data_dir("up-missing");
    seed_three(&data_dir);

    let output = Command::new(exe)
        .args(["up", "9"])
        .env("TASKDECK_DATA_DIR", &data_dir)
        .output()
        .expect("failed to run up command");

    std::fs::remove_dir_all(&data_dir).ok();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}

#[test]
fn up_command_json_prints_the_new_order() {
    let exe = env!("CARGO_BIN_EXE_taskdeck");
    let data_dir = temp_data_dir("up-json");
    seed_three(&data_dir);

    let output = Command::new(exe)
        .args(["--json", "up", "3"])
        .env("TASKDECK_DATA_DIR", &data_dir)
        .output()
        .expect("failed to run up command");

    std::fs::remove_dir_all(&data_dir).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    let texts: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["text"].as_str().unwrap())
        .collect();

    assert_eq!(texts, ["A", "C", "B"]);
}
