use super::VERSION;
use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

/// Takes the CLI arguments that control the rendering of the charts.
/// Without arguments the current working directory is scanned.
pub fn parse_cli() -> (PathBuf, u8) {
    let cli_args = cli_command().get_matches();
    read_matches(&cli_args)
}

fn cli_command() -> Command {
    let arg_dir = Arg::new("dir")
        .help("directory with the csv and log files to render")
        .short('d')
        .long("dir")
        .num_args(1)
        .value_parser(value_parser!(PathBuf))
        .default_value(".");
    let arg_verbose = Arg::new("verbose")
        .help("print diagnostics, repeat for more")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count);
    Command::new("stats_graphs")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to render csv and log time series to interactive html charts")
        .arg(arg_dir)
        .arg(arg_verbose)
}

// dir get_one always returns Some(T) because the default was set,
// and a Count action always has a value
fn read_matches(cli_args: &clap::ArgMatches) -> (PathBuf, u8) {
    let dir: PathBuf = cli_args
        .get_one::<PathBuf>("dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let verbose: u8 = cli_args.get_count("verbose");
    (dir, verbose)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> (PathBuf, u8) {
        let m = cli_command().try_get_matches_from(args).unwrap();
        read_matches(&m)
    }

    #[test]
    fn defaults_to_working_directory() {
        assert_eq!(parse(&["stats_graphs"]), (PathBuf::from("."), 0));
    }

    #[test]
    fn dir_and_verbosity() {
        assert_eq!(
            parse(&["stats_graphs", "-d", "recordings", "-vv"]),
            (PathBuf::from("recordings"), 2)
        );
        assert_eq!(
            parse(&["stats_graphs", "--dir", "a", "--verbose"]),
            (PathBuf::from("a"), 1)
        );
    }

    #[test]
    fn positional_arguments_are_rejected() {
        assert!(cli_command()
            .try_get_matches_from(["stats_graphs", "x.csv"])
            .is_err());
    }

    #[test]
    fn command_is_consistent() {
        cli_command().debug_assert();
    }
}
