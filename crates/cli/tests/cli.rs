use assert_cmd::Command;

fn courselib() -> Command {
    let mut cmd = Command::cargo_bin("courselib").unwrap();
    cmd.env("COURSELIB_CONFIG_DIR", env!("CARGO_MANIFEST_DIR"))
        .env_remove("COURSELIB_ENV");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn openapi_lists_resource_paths() {
    let stdout = stdout_of(courselib().arg("openapi"));
    assert!(stdout.contains("/api/authors/{author_id}/courses/{course_id}"));
    assert!(stdout.contains("/api/authorcollections/{ids}"));
}

#[test]
fn settings_honours_environment_overrides() {
    let stdout = stdout_of(
        courselib()
            .arg("settings")
            .env("COURSELIB_SERVER__PORT", "9191"),
    );
    assert!(stdout.contains("9191"));
}

#[test]
fn unknown_environment_fails() {
    let stderr = courselib()
        .arg("settings")
        .env("COURSELIB_ENV", "moon")
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    assert!(String::from_utf8(stderr).unwrap().contains("unsupported environment"));
}
