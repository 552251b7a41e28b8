use rinkside_cli::run;
use serial_test::serial;

fn clear_env() {
    for key in [
        "RINKSIDE_CONFIG",
        "RINKSIDE_SEED",
        "RINKSIDE_GAME_LENGTH",
        "RINKSIDE_HOME_STRENGTH",
        "RINKSIDE_AWAY_STRENGTH",
    ] {
        unsafe {
            std::env::remove_var(key);
        }
    }
}

fn run_args(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(args.iter().copied(), &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
#[serial]
fn game_prints_box_score_table() {
    clear_env();
    let (code, out, err) = run_args(&["rinkside", "game", "--seed", "42"]);
    assert_eq!(code, 0, "{err}");
    let rows: Vec<&str> = out.lines().collect();
    let header = rows
        .iter()
        .position(|l| l.trim_start().starts_with("Home") && l.contains("Away") && !l.starts_with("Home:"))
        .expect("table header");
    assert!(rows[header + 1].starts_with("Score"));
    assert!(rows[header + 2].starts_with("SOG"));
    assert!(rows[header + 3].starts_with("Saves"));
    let result = rows[header + 4];
    assert!(
        result.starts_with("Home wins")
            || result.starts_with("Away wins")
            || result.starts_with("Tied"),
        "{result}"
    );
}

#[test]
#[serial]
fn seed_from_env_is_used() {
    clear_env();
    unsafe {
        std::env::set_var("RINKSIDE_SEED", "1234");
    }
    let (code, out, _) = run_args(&["rinkside", "game"]);
    let (_, flagged, _) = run_args(&["rinkside", "game", "--seed", "1234"]);
    clear_env();
    assert_eq!(code, 0);
    assert!(out.starts_with("Seed: 1234"));
    assert_eq!(out, flagged);
}

#[test]
#[serial]
fn flag_overrides_env_strength() {
    clear_env();
    unsafe {
        std::env::set_var("RINKSIDE_HOME_STRENGTH", "40");
    }
    let (code, out, _) = run_args(&["rinkside", "game", "--seed", "1", "--home", "90"]);
    clear_env();
    assert_eq!(code, 0);
    assert!(out.contains("Home: flat 90"));
}

#[test]
#[serial]
fn trace_lists_ticks_before_the_table() {
    clear_env();
    let (code, out, _) = run_args(&[
        "rinkside", "game", "--seed", "8", "--length", "30", "--trace",
    ]);
    assert_eq!(code, 0);
    let first_tick = out.lines().position(|l| l.starts_with('#')).unwrap();
    let score = out.lines().position(|l| l.starts_with("Score")).unwrap();
    assert!(first_tick < score);
}

#[test]
#[serial]
fn invalid_config_exits_with_error() {
    clear_env();
    unsafe {
        std::env::set_var("RINKSIDE_AWAY_STRENGTH", "0");
    }
    let (code, _, err) = run_args(&["rinkside", "game", "--seed", "1"]);
    clear_env();
    assert_eq!(code, 2);
    assert!(err.contains("Invalid configuration"));
}

#[test]
#[serial]
fn config_file_supplies_defaults() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("rinkside.toml");
    std::fs::write(&cfg, "seed = 77\ngame_length = 60\n").unwrap();
    unsafe {
        std::env::set_var("RINKSIDE_CONFIG", &cfg);
    }
    let (code, out, _) = run_args(&["rinkside", "game"]);
    clear_env();
    assert_eq!(code, 0);
    assert!(out.starts_with("Seed: 77"));
    assert!(out.contains("Length: 60s"));
}

#[test]
#[serial]
fn zero_length_exits_with_error() {
    clear_env();
    let (code, _, err) = run_args(&["rinkside", "game", "--length", "0"]);
    assert_eq!(code, 2);
    assert!(err.contains("length must be >= 1"));
}
