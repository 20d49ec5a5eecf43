use clap::Parser;
use confkit::cli::commands::get::ValueKind;
use confkit::cli::commands::log::LevelArg;
use confkit::cli::{Cli, Commands, DEFAULT_CONFIG_PATH};
use std::path::PathBuf;

#[test]
fn test_parse_get_defaults() {
    let cli = Cli::try_parse_from(["confkit", "get", "server.port"]).unwrap();

    assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
    assert!(!cli.json);
    match cli.command {
        Commands::Get(args) => {
            assert_eq!(args.key, "server.port");
            assert_eq!(args.kind, ValueKind::Raw);
        }
        Commands::Log(_) => panic!("Wrong command"),
    }
}

#[test]
fn test_parse_get_with_config_and_kind() {
    let cli = Cli::try_parse_from([
        "confkit", "-c", "/etc/app.yaml", "--json", "get", "a.b", "--as", "strings",
    ])
    .unwrap();

    assert_eq!(cli.config, PathBuf::from("/etc/app.yaml"));
    assert!(cli.json);
    match cli.command {
        Commands::Get(args) => assert_eq!(args.kind, ValueKind::Strings),
        Commands::Log(_) => panic!("Wrong command"),
    }
}

#[test]
fn test_config_flag_after_subcommand() {
    let cli = Cli::try_parse_from(["confkit", "get", "a", "-c", "other.yaml"]).unwrap();
    assert_eq!(cli.config, PathBuf::from("other.yaml"));
}

#[test]
fn test_parse_log() {
    let cli = Cli::try_parse_from([
        "confkit", "log", "payment failed", "--channel", "billing", "--subdir", "eu", "--subdir",
        "2024", "--level", "error",
    ])
    .unwrap();

    match cli.command {
        Commands::Log(args) => {
            assert_eq!(args.message, "payment failed");
            assert_eq!(args.channel, "billing");
            assert_eq!(args.subdirs, vec!["eu", "2024"]);
            assert_eq!(args.level, LevelArg::Error);
        }
        Commands::Get(_) => panic!("Wrong command"),
    }
}

#[test]
fn test_parse_log_defaults() {
    let cli = Cli::try_parse_from(["confkit", "log", "hello"]).unwrap();
    match cli.command {
        Commands::Log(args) => {
            assert_eq!(args.channel, "server");
            assert!(args.subdirs.is_empty());
            assert_eq!(args.level, LevelArg::Info);
        }
        Commands::Get(_) => panic!("Wrong command"),
    }
}

#[test]
fn test_rejects_unknown_kind() {
    assert!(Cli::try_parse_from(["confkit", "get", "a", "--as", "tuple"]).is_err());
}
