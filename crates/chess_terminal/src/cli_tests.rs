use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_no_arguments_plays() {
    assert_eq!(
        parse_args(&[]),
        Ok(CliCommand::Play(CliOptions::default()))
    );
}

#[test]
fn test_play_flags() {
    let parsed = parse_args(&args(&[
        "--white", "alice", "--black", "bob", "--ascii", "--stats", "s.json",
    ]))
    .unwrap();
    assert_eq!(
        parsed,
        CliCommand::Play(CliOptions {
            config: None,
            white_name: Some("alice".to_string()),
            black_name: Some("bob".to_string()),
            stats_path: Some(PathBuf::from("s.json")),
            ascii: true,
        })
    );
    assert!(matches!(
        parse_args(&args(&["play", "--config", "x.toml"])),
        Ok(CliCommand::Play(CliOptions { config: Some(_), .. }))
    ));
}

#[test]
fn test_stats_subcommand() {
    assert_eq!(
        parse_args(&args(&["stats", "alice", "--stats", "s.json"])),
        Ok(CliCommand::Stats {
            name: Some("alice".to_string()),
            options: CliOptions {
                stats_path: Some(PathBuf::from("s.json")),
                ..CliOptions::default()
            },
        })
    );
    assert!(matches!(
        parse_args(&args(&["stats"])),
        Ok(CliCommand::Stats { name: None, .. })
    ));
}

#[test]
fn test_errors() {
    assert_eq!(
        parse_args(&args(&["--white"])),
        Err(CliError::MissingValue("--white".to_string()))
    );
    assert_eq!(
        parse_args(&args(&["--colour", "red"])),
        Err(CliError::Unknown("--colour".to_string()))
    );
    assert_eq!(
        parse_args(&args(&["stats", "a", "b"])),
        Err(CliError::Unknown("b".to_string()))
    );
    assert_eq!(parse_args(&args(&["help"])), Ok(CliCommand::Help));
}
