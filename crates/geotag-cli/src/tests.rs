use super::*;

#[test]
fn parses_file_command() {
    let cli = Cli::try_parse_from(["geotag", "file", "notes/paris.md"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::File { ref path } if path == &PathBuf::from("notes/paris.md")
    ));
    assert!(cli.settings.is_none());
    assert_eq!(cli.vault, PathBuf::from("."));
}

#[test]
fn parses_folder_command() {
    let cli = Cli::try_parse_from(["geotag", "folder", "trips"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Folder { ref dir } if dir == &PathBuf::from("trips")
    ));
}

#[test]
fn parses_all_with_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "geotag",
        "all",
        "--vault",
        "/vault",
        "--settings",
        "/vault/geotag.json",
    ])
    .expect("expected valid cli args");

    assert!(matches!(cli.command, Commands::All));
    assert_eq!(cli.vault, PathBuf::from("/vault"));
    assert_eq!(cli.settings, Some(PathBuf::from("/vault/geotag.json")));
}

#[test]
fn parses_settings_show_command() {
    let cli = Cli::try_parse_from(["geotag", "settings", "show"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Settings {
            command: SettingsCommands::Show
        }
    ));
}

#[test]
fn parses_settings_init_defaults_to_no_force() {
    let cli = Cli::try_parse_from(["geotag", "settings", "init"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Settings {
            command: SettingsCommands::Init { force: false }
        }
    ));
}

#[test]
fn parses_settings_init_force() {
    let cli = Cli::try_parse_from(["geotag", "settings", "init", "--force"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Settings {
            command: SettingsCommands::Init { force: true }
        }
    ));
}

#[test]
fn file_command_requires_path() {
    assert!(Cli::try_parse_from(["geotag", "file"]).is_err());
}

#[test]
fn missing_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["geotag"]).is_err());
}
