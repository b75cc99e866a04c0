#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn parayan(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("parayan").unwrap();
    cmd.current_dir(dir.path())
        .env("PARAYAN_ROOT", dir.path())
        .env_remove("PARAYAN_GROUP")
        .env_remove("PARAYAN_CLIPBOARD");
    cmd
}

fn init_project(dir: &TempDir) {
    parayan(dir).arg("init").assert().success();
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.arg("--json").assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

fn chapters(dir: &TempDir) -> Vec<u64> {
    let members = json_output(parayan(dir).args(["member", "list"]));
    members
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["currentChapter"].as_u64().unwrap())
        .collect()
}

fn member_id(dir: &TempDir, index: usize) -> String {
    let members = json_output(parayan(dir).args(["member", "list"]));
    members[index]["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// parayan init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_config_and_seeded_groups() {
    let dir = TempDir::new().unwrap();
    parayan(&dir).arg("init").assert().success();

    assert!(dir.path().join(".parayan/config.yaml").exists());
    assert!(dir
        .path()
        .join(".parayan/kalpavriksha_groups_v1.json")
        .exists());

    parayan(&dir)
        .args(["member", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Member 1"))
        .stdout(predicate::str::contains("Member 2"));
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    parayan(&dir).args(["member", "add", "Asha"]).assert().success();
    parayan(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:"));
    assert_eq!(chapters(&dir), vec![1, 2, 3]);
}

#[test]
fn init_migrates_legacy_roster() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".parayan")).unwrap();
    std::fs::write(
        dir.path().join(".parayan/kalpavriksha_members_v1.json"),
        r#"[{"id":"x","name":"Old Reader","currentChapter":12}]"#,
    )
    .unwrap();

    init_project(&dir);

    assert!(!dir
        .path()
        .join(".parayan/kalpavriksha_members_v1.json")
        .exists());
    parayan(&dir)
        .args(["member", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Old Reader"));
}

#[test]
fn commands_require_init() {
    let dir = TempDir::new().unwrap();
    parayan(&dir)
        .args(["member", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

// ---------------------------------------------------------------------------
// parayan member
// ---------------------------------------------------------------------------

#[test]
fn member_add_defaults_to_next_chapter() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    parayan(&dir)
        .args(["member", "add", "Kalyani", "Khope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kalyani Khope (chapter 3)"));
}

#[test]
fn member_add_rejects_bad_chapter() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    parayan(&dir)
        .args(["member", "add", "Asha", "--chapter", "22"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid chapter 22"));
    assert_eq!(chapters(&dir), vec![1, 2]);
}

#[test]
fn member_bulk_from_stdin_assigns_sequential_chapters() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    parayan(&dir)
        .args(["member", "bulk"])
        .write_stdin("Asha\n\n  Bhau  \nChitra\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 3 members"));

    assert_eq!(chapters(&dir), vec![1, 2, 3, 4, 5]);
}

#[test]
fn member_bulk_from_file_drops_names_past_limit() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let names: Vec<String> = (1..=25).map(|i| format!("Reader {i}")).collect();
    let file = dir.path().join("names.txt");
    std::fs::write(&file, names.join("\n")).unwrap();

    let out = json_output(parayan(&dir).args(["member", "bulk", "--file"]).arg(&file));
    assert_eq!(out["added"].as_array().unwrap().len(), 19);
    assert_eq!(out["dropped"], 6);

    let chapters = chapters(&dir);
    assert_eq!(chapters.len(), 21);
    assert_eq!(chapters[20], 21);

    parayan(&dir)
        .args(["member", "add", "One More"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max 21 members"));
}

#[test]
fn member_edit_syncs_later_members_by_default() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    parayan(&dir)
        .args(["member", "bulk"])
        .write_stdin("A\nB\n")
        .assert()
        .success();

    let id = member_id(&dir, 0);
    parayan(&dir)
        .args(["member", "edit", &id, "--chapter", "20"])
        .assert()
        .success();

    assert_eq!(chapters(&dir), vec![20, 21, 1, 2]);
}

#[test]
fn member_edit_no_sync_changes_one_member() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    parayan(&dir)
        .args(["member", "edit", "Member 1", "--chapter", "9", "--no-sync"])
        .assert()
        .success();
    assert_eq!(chapters(&dir), vec![9, 2]);

    parayan(&dir)
        .args(["member", "edit", "Member 2", "--name", "Renamed", "--no-sync"])
        .assert()
        .success();
    parayan(&dir)
        .args(["member", "list"])
        .assert()
        .stdout(predicate::str::contains("Renamed"));
}

#[test]
fn member_edit_unknown_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    parayan(&dir)
        .args(["member", "edit", "ghost", "--chapter", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn member_delete_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    parayan(&dir)
        .args(["member", "delete", "Member 1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
    assert_eq!(chapters(&dir).len(), 2);

    parayan(&dir)
        .args(["member", "delete", "Member 1", "--yes"])
        .assert()
        .success();
    assert_eq!(chapters(&dir), vec![2]);
}

// ---------------------------------------------------------------------------
// parayan rotate
// ---------------------------------------------------------------------------

#[test]
fn rotate_advances_and_wraps() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    parayan(&dir)
        .args(["member", "add", "Last", "--chapter", "21"])
        .assert()
        .success();

    parayan(&dir).arg("rotate").assert().failure();
    assert_eq!(chapters(&dir), vec![1, 2, 21]);

    parayan(&dir).args(["rotate", "--yes"]).assert().success();
    assert_eq!(chapters(&dir), vec![2, 3, 1]);
}

#[test]
fn rotate_empty_group_is_noop() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    parayan(&dir).args(["group", "add", "Empty"]).assert().success();

    parayan(&dir)
        .args(["rotate", "--group", "Empty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to rotate"));
}

// ---------------------------------------------------------------------------
// parayan message
// ---------------------------------------------------------------------------

#[test]
fn message_generate_renders_sorted_template() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    parayan(&dir)
        .args(["member", "add", "Asha", "--chapter", "1"])
        .assert()
        .success();

    let out = parayan(&dir)
        .args(["message", "generate", "--date", "2026-02-17"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("जय गजानन!\n*पारायण गृप*\n"));
    assert!(text.contains("*दि. 19/02/2026 गुरुवार* ला वाचावयाचे अध्याय खाली दिले आहे."));
    let member_1 = text.find("Member 1").unwrap();
    let asha = text.find("Asha").unwrap();
    let member_2 = text.find("Member 2").unwrap();
    assert!(member_1 < asha && asha < member_2);
    assert!(text.contains("Asha                  1"));
    assert!(text
        .trim_end()
        .ends_with("अध्याय वाचल्यानंतर गृपवर त्वरित कळविणे आवश्यक आहे."));
}

#[test]
fn message_is_cleared_by_roster_changes() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    parayan(&dir)
        .args(["message", "generate"])
        .assert()
        .success();
    parayan(&dir)
        .args(["message", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Member 1"));

    parayan(&dir).args(["rotate", "--yes"]).assert().success();
    parayan(&dir)
        .args(["message", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no message generated"));
}

#[test]
fn message_generate_on_empty_group_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    parayan(&dir).args(["group", "add", "Empty"]).assert().success();

    parayan(&dir)
        .args(["message", "generate", "-g", "Empty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("add members first"));
}

#[test]
fn message_copy_pipes_to_clipboard_tool() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let sink = dir.path().join("clipboard.txt");

    parayan(&dir)
        .args(["message", "generate", "--date", "2026-02-19", "--copy"])
        .env("PARAYAN_CLIPBOARD", format!("tee {}", sink.display()))
        .assert()
        .success();

    let copied = std::fs::read_to_string(&sink).unwrap();
    assert!(copied.contains("*दि. 19/02/2026 गुरुवार*"));
}

#[test]
fn message_copy_failure_keeps_message() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    parayan(&dir)
        .args(["message", "generate"])
        .assert()
        .success();

    parayan(&dir)
        .args(["message", "copy"])
        .env("PARAYAN_CLIPBOARD", "/nonexistent/clipboard-tool")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to copy message"));

    parayan(&dir).args(["message", "show"]).assert().success();
}

#[test]
fn message_belongs_to_the_group_it_was_generated_for() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    parayan(&dir).args(["group", "add", "Evening"]).assert().success();
    parayan(&dir)
        .args(["member", "add", "-g", "Evening", "Zed"])
        .assert()
        .success();
    parayan(&dir)
        .args(["message", "generate"])
        .assert()
        .success();

    parayan(&dir)
        .args(["message", "show", "-g", "Evening"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no message generated"));
    parayan(&dir)
        .args(["message", "copy", "-g", "Evening"])
        .env("PARAYAN_CLIPBOARD", "cat")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no message generated"));

    // Changing Evening does not discard the first group's message.
    parayan(&dir)
        .args(["rotate", "-g", "Evening", "--yes"])
        .assert()
        .success();
    parayan(&dir)
        .args(["message", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Member 1"))
        .stdout(predicate::str::contains("Zed").not());
}

#[test]
fn message_set_replaces_text() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    parayan(&dir)
        .args(["message", "set"])
        .write_stdin("hand edited\n")
        .assert()
        .success();
    parayan(&dir)
        .args(["message", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hand edited"));
}

// ---------------------------------------------------------------------------
// parayan group
// ---------------------------------------------------------------------------

#[test]
fn group_add_rename_delete() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    parayan(&dir)
        .args(["group", "add"])
        .assert()
        .success()
        .stdout(predicate::str::contains("पारायण गृप २"));
    parayan(&dir)
        .args(["group", "rename", "पारायण गृप २", "Evening", "Readers"])
        .assert()
        .success();
    parayan(&dir)
        .args(["group", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Evening Readers"));

    parayan(&dir)
        .args(["member", "add", "Asha", "-g", "Evening Readers"])
        .assert()
        .success();
    assert_eq!(chapters(&dir), vec![1, 2]);

    parayan(&dir)
        .args(["group", "delete", "Evening Readers", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 members"));
}

#[test]
fn last_group_cannot_be_deleted() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    parayan(&dir)
        .args(["group", "delete", "default-1", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("last remaining group"));
}

#[test]
fn unknown_group_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    parayan(&dir)
        .args(["member", "list", "--group", "Nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("group not found"));
}

// ---------------------------------------------------------------------------
// parayan status / config
// ---------------------------------------------------------------------------

#[test]
fn status_reports_member_count() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let status = json_output(parayan(&dir).arg("status"));
    assert_eq!(status["members"], 2);
    assert_eq!(status["max_members"], 21);
    assert_eq!(status["reading_day"], "Thu");
}

#[test]
fn config_validate_passes_on_fresh_init() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    parayan(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No warnings"));
}

#[test]
fn config_validate_does_not_migrate_legacy_roster() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let groups = dir.path().join(".parayan/kalpavriksha_groups_v1.json");
    let legacy = dir.path().join(".parayan/kalpavriksha_members_v1.json");
    std::fs::remove_file(&groups).unwrap();
    std::fs::write(
        &legacy,
        r#"[{"id":"a","name":"Asha","currentChapter":30}]"#,
    )
    .unwrap();

    parayan(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chapter 30"));
    assert!(legacy.exists());
    assert!(!groups.exists());
}

#[test]
fn config_validate_reports_unreadable_groups_file() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let groups = dir.path().join(".parayan/kalpavriksha_groups_v1.json");
    std::fs::write(&groups, "{not json").unwrap();

    parayan(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("groups file is unreadable"));
    assert_eq!(std::fs::read_to_string(&groups).unwrap(), "{not json");
}

#[test]
fn unreadable_groups_file_survives_as_backup() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let groups = dir.path().join(".parayan/kalpavriksha_groups_v1.json");
    let original =
        r#"[{"id":"g","name":"Mine","members":[{"id":"a","name":"Asha","currentChapter":"3"}]}]"#;
    std::fs::write(&groups, original).unwrap();

    parayan(&dir)
        .args(["member", "add", "Bob"])
        .assert()
        .success();

    let backup = dir.path().join(".parayan/kalpavriksha_groups_v1.json.bak");
    assert_eq!(std::fs::read_to_string(backup).unwrap(), original);
    let names: Vec<String> = json_output(parayan(&dir).args(["member", "list"]))
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Member 1", "Member 2", "Bob"]);
}

#[test]
fn config_validate_flags_zero_chapters() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    std::fs::write(
        dir.path().join(".parayan/config.yaml"),
        "version: 1\ntotal_chapters: 0\n",
    )
    .unwrap();

    parayan(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("total_chapters must be at least 1"));
    parayan(&dir)
        .args(["member", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}
