use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ACCOUNT_PW: &str = "account-pw";
const CONTENT_PW: &str = "correct-horse";

fn purenote(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("purenote").unwrap();
    cmd.env("PURENOTE_DATA_DIR", dir.path())
        .env("RUST_LOG", "warn")
        .env_remove("PURENOTE_USER")
        .env_remove("PURENOTE_PASSWORD")
        .env_remove("PURENOTE_CONTENT_PASSWORD");
    cmd
}

fn as_alice(dir: &TempDir) -> Command {
    let mut cmd = purenote(dir);
    cmd.env("PURENOTE_USER", "alice")
        .env("PURENOTE_PASSWORD", ACCOUNT_PW)
        .env("PURENOTE_CONTENT_PASSWORD", CONTENT_PW);
    cmd
}

fn register_alice(dir: &TempDir) {
    purenote(dir)
        .env("PURENOTE_PASSWORD", ACCOUNT_PW)
        .args(["user", "register", "alice", "--email", "alice@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered user: alice"));
}

/// Pull the `ent-xxxxxxxx` id out of "Created entry: <title> (<id>)"
fn created_id(stdout: &[u8]) -> String {
    let text = String::from_utf8_lossy(stdout);
    let start = text.rfind('(').unwrap() + 1;
    let end = text.rfind(')').unwrap();
    text[start..end].to_string()
}

#[test]
fn test_init_and_config() {
    let dir = TempDir::new().unwrap();

    purenote(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete"));
    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("entries.json").exists());

    purenote(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Audit enabled:   true"));
}

#[test]
fn test_entry_lifecycle() {
    let dir = TempDir::new().unwrap();
    register_alice(&dir);

    let output = as_alice(&dir)
        .args([
            "entry",
            "add",
            "First day",
            "--content",
            "Dear diary, today...",
            "--mood",
            "happy",
            "--tag",
            "travel",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created entry: First day"))
        .get_output()
        .stdout
        .clone();
    let id = created_id(&output);

    // Only the envelope reaches the disk
    let stored = std::fs::read_to_string(dir.path().join("data").join("entries.json")).unwrap();
    assert!(stored.contains("First day"));
    assert!(!stored.contains("Dear diary"));

    as_alice(&dir)
        .args(["entry", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dear diary, today..."))
        .stdout(predicate::str::contains("Mood:     happy"));

    as_alice(&dir)
        .env("PURENOTE_CONTENT_PASSWORD", "wrong-horse")
        .args(["entry", "show", &id])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Dear diary").not())
        .stderr(predicate::str::contains("Invalid encryption password"));

    as_alice(&dir)
        .args(["tag", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("travel"));

    // Without --force nothing is removed
    as_alice(&dir)
        .args(["entry", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));
    as_alice(&dir)
        .args(["entry", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("First day"));

    as_alice(&dir)
        .args(["entry", "delete", &id, "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted entry: First day"));
    as_alice(&dir)
        .args(["entry", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No diary entries found."));

    as_alice(&dir)
        .args(["audit", "--limit", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DELETE"));
}

#[test]
fn test_edit_keeps_unchanged_fields() {
    let dir = TempDir::new().unwrap();
    register_alice(&dir);

    let output = as_alice(&dir)
        .args(["entry", "add", "Draft", "--tag", "work"])
        .write_stdin("Body read from stdin")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let id = created_id(&output);

    as_alice(&dir)
        .args(["entry", "edit", &id, "--title", "Final"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated entry: Final"));

    as_alice(&dir)
        .args(["entry", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Final\n"))
        .stdout(predicate::str::contains("Tags:     work"))
        .stdout(predicate::str::contains("Body read from stdin"));
}

#[test]
fn test_search_by_tag() {
    let dir = TempDir::new().unwrap();
    register_alice(&dir);

    for (title, tag) in [("Beach", "travel"), ("Standup", "work")] {
        as_alice(&dir)
            .args(["entry", "add", title, "--content", "text", "--tag", tag])
            .assert()
            .success();
    }

    as_alice(&dir)
        .args(["entry", "search", "--tag", "TRAVEL"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Beach"))
        .stdout(predicate::str::contains("Standup").not());
}

#[test]
fn test_search_limit_reaches_every_match() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), r#"{"list_limit": 1}"#).unwrap();
    register_alice(&dir);

    for title in ["Paris trip", "Rome trip"] {
        as_alice(&dir)
            .args(["entry", "add", title, "--content", "text"])
            .assert()
            .success();
    }

    as_alice(&dir)
        .args(["entry", "search", "--title", "trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1 of 2"));

    as_alice(&dir)
        .args(["entry", "search", "--title", "trip", "--limit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Paris trip"))
        .stdout(predicate::str::contains("Rome trip"))
        .stdout(predicate::str::contains("Showing").not());
}

#[test]
fn test_audit_shows_only_own_activity() {
    let dir = TempDir::new().unwrap();
    register_alice(&dir);
    purenote(&dir)
        .env("PURENOTE_PASSWORD", ACCOUNT_PW)
        .args(["user", "register", "bob", "--email", "bob@example.com"])
        .assert()
        .success();

    as_alice(&dir)
        .args(["entry", "add", "Alice private title", "--content", "text"])
        .assert()
        .success();

    as_alice(&dir)
        .args(["audit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice private title"));

    purenote(&dir)
        .env("PURENOTE_USER", "bob")
        .env("PURENOTE_PASSWORD", ACCOUNT_PW)
        .args(["audit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bob"))
        .stdout(predicate::str::contains("Alice private title").not())
        .stdout(predicate::str::contains("alice").not());

    purenote(&dir)
        .args(["audit"])
        .env("PURENOTE_PASSWORD", ACCOUNT_PW)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user given"));
}

#[test]
fn test_wrong_account_password() {
    let dir = TempDir::new().unwrap();
    register_alice(&dir);

    as_alice(&dir)
        .env("PURENOTE_PASSWORD", "not-my-password")
        .args(["entry", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));
}

#[test]
fn test_missing_user() {
    let dir = TempDir::new().unwrap();

    purenote(&dir)
        .env("PURENOTE_PASSWORD", ACCOUNT_PW)
        .args(["entry", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user given"));
}

#[test]
fn test_duplicate_registration() {
    let dir = TempDir::new().unwrap();
    register_alice(&dir);

    purenote(&dir)
        .env("PURENOTE_PASSWORD", ACCOUNT_PW)
        .args(["user", "register", "alice", "--email", "other@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_json_export_to_stdout_stays_encrypted() {
    let dir = TempDir::new().unwrap();
    register_alice(&dir);

    as_alice(&dir)
        .args(["entry", "add", "Secret", "--content", "Dear diary, today..."])
        .assert()
        .success();

    as_alice(&dir)
        .args(["export", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"encryption_salt\""))
        .stdout(predicate::str::contains("Secret"))
        .stdout(predicate::str::contains("Dear diary").not())
        .stdout(predicate::str::contains("argon2").not());
}
