use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("scenario")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate, poll and tabulate rolling percentage metrics")
        .long_about("scenario writes a small CSV snapshot of per-symbol percentage metrics on a timer, and polls that file to keep a bounded, timestamp-indexed history per metric. The most recent rows of each metric are shown as fractional values.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("generate")
                .about("Periodically replace the feed file with a random snapshot")
                .arg(path_arg())
                .arg(
                    Arg::new("interval")
                        .long("interval")
                        .short('i')
                        .help("Seconds between snapshots (overrides config, default: 10)")
                        .value_parser(clap::value_parser!(u64).range(1..))
                )
                .arg(
                    Arg::new("count")
                        .long("count")
                        .short('c')
                        .help("Stop after this many snapshots (default: run forever)")
                        .value_parser(clap::value_parser!(u64).range(1..))
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Seed for a reproducible snapshot sequence (overrides config)")
                        .value_parser(clap::value_parser!(u64))
                )
        )
        .subcommand(
            Command::new("show")
                .about("Poll the feed file once and print the latest window of every metric")
                .arg(path_arg())
                .arg(rows_arg())
                .arg(json_arg())
        )
        .subcommand(
            Command::new("watch")
                .about("Poll the feed file and re-print the windows whenever it changes")
                .arg(path_arg())
                .arg(rows_arg())
                .arg(json_arg())
                .arg(
                    Arg::new("poll-ms")
                        .long("poll-ms")
                        .help("Milliseconds between polls (overrides config, default: 8000)")
                        .value_parser(clap::value_parser!(u64).range(1..))
                )
                .arg(
                    Arg::new("iterations")
                        .long("iterations")
                        .help("Stop after this many polls (default: run forever)")
                        .value_parser(clap::value_parser!(u64).range(1..))
                )
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .help("Shell to generate completions for")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(clap_complete::Shell))
                )
        )
}

fn path_arg() -> Arg {
    Arg::new("path")
        .long("path")
        .short('p')
        .help("Feed CSV file (overrides config, default: scenario2.csv)")
        .value_parser(clap::value_parser!(std::path::PathBuf))
}

fn rows_arg() -> Arg {
    Arg::new("rows")
        .long("rows")
        .short('r')
        .help("Number of most recent rows to show per metric (overrides config, default: 20)")
        .value_parser(clap::value_parser!(u64).range(1..))
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Output in JSON format")
        .action(ArgAction::SetTrue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cli_build() {
        let app = build_cli();
        assert_eq!(app.get_name(), "scenario");
    }

    #[test]
    fn test_cli_requires_subcommand() {
        let app = build_cli();
        assert!(app.try_get_matches_from(vec!["scenario"]).is_err());
    }

    #[test]
    fn test_cli_generate_command() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec![
                "scenario", "generate", "--path", "feed.csv", "--interval", "2", "--count", "3",
                "--seed", "42",
            ])
            .unwrap();

        let generate = matches.subcommand_matches("generate").unwrap();
        assert_eq!(
            generate.get_one::<PathBuf>("path").unwrap(),
            &PathBuf::from("feed.csv")
        );
        assert_eq!(generate.get_one::<u64>("interval").copied(), Some(2));
        assert_eq!(generate.get_one::<u64>("count").copied(), Some(3));
        assert_eq!(generate.get_one::<u64>("seed").copied(), Some(42));
    }

    #[test]
    fn test_cli_generate_rejects_zero_interval() {
        let app = build_cli();
        let matches = app.try_get_matches_from(vec!["scenario", "generate", "--interval", "0"]);
        assert!(matches.is_err());
    }

    #[test]
    fn test_cli_show_defaults() {
        let app = build_cli();
        let matches = app.try_get_matches_from(vec!["scenario", "show"]).unwrap();

        let show = matches.subcommand_matches("show").unwrap();
        assert!(!show.get_flag("json"));
        assert!(show.get_one::<PathBuf>("path").is_none());
        assert!(show.get_one::<u64>("rows").is_none());
    }

    #[test]
    fn test_cli_show_json_and_rows() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["scenario", "show", "--json", "--rows", "5"])
            .unwrap();

        let show = matches.subcommand_matches("show").unwrap();
        assert!(show.get_flag("json"));
        assert_eq!(show.get_one::<u64>("rows").copied(), Some(5));
    }

    #[test]
    fn test_cli_show_rejects_zero_rows() {
        let app = build_cli();
        let matches = app.try_get_matches_from(vec!["scenario", "show", "--rows", "0"]);
        assert!(matches.is_err());
    }

    #[test]
    fn test_cli_watch_command() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec![
                "scenario",
                "watch",
                "--poll-ms",
                "250",
                "--iterations",
                "4",
            ])
            .unwrap();

        let watch = matches.subcommand_matches("watch").unwrap();
        assert_eq!(watch.get_one::<u64>("poll-ms").copied(), Some(250));
        assert_eq!(watch.get_one::<u64>("iterations").copied(), Some(4));
    }

    #[test]
    fn test_cli_completions_requires_known_shell() {
        let app = build_cli();
        assert!(
            app.clone()
                .try_get_matches_from(vec!["scenario", "completions", "bash"])
                .is_ok()
        );
        assert!(
            app.try_get_matches_from(vec!["scenario", "completions", "cmd"])
                .is_err()
        );
    }

    #[test]
    fn test_cli_verbose_flag_after_subcommand() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["scenario", "show", "-v"])
            .unwrap();
        assert!(matches.get_flag("verbose"));
    }

    #[test]
    fn test_cli_verbose_flag_default_false() {
        let app = build_cli();
        let matches = app.try_get_matches_from(vec!["scenario", "show"]).unwrap();
        assert!(!matches.get_flag("verbose"));
    }
}
