use std::process::{Command, Output};

fn snake(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_snake"))
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .expect("failed to launch the snake binary")
}

#[test]
fn help_lists_the_runtime_flags() {
    let output = snake(&["--help"]);
    assert!(output.status.success(), "--help should exit cleanly");

    let help = String::from_utf8_lossy(&output.stdout);
    for flag in ["--config", "--seed", "--tick-rate", "--no-vsync", "--show-fps"] {
        assert!(help.contains(flag), "help text is missing {flag}");
    }
}

#[test]
fn zero_tick_rate_fails_before_opening_a_window() {
    let output = snake(&["--tick-rate", "0"]);

    assert!(!output.status.success(), "a zero tick rate must be rejected");
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("tick_rate"),
        "the failure should name the offending setting"
    );
}

#[test]
fn unreadable_settings_file_is_reported() {
    let output = snake(&["--config", "no/such/snake.toml"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no/such/snake.toml"));
}
