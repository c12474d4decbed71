use anyhow::Result;
use backfill_cli::{init_tracing, read_input, run_palette, run_transform, TransformArgs};
use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .value_parser(value_parser!(PathBuf))
        .help("TOML config file")
}

fn cli() -> Command {
    Command::new("backfill")
        .version(backfill_core::VERSION)
        .about("Fill absent values in JSON documents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("transform")
                .about("Read JSON, substitute absent values, print the result")
                .arg(
                    Arg::new("input")
                        .long("input")
                        .short('i')
                        .value_parser(value_parser!(PathBuf))
                        .help("Input file (stdin when omitted)"),
                )
                .arg(
                    Arg::new("replace-falsy")
                        .long("replace-falsy")
                        .action(ArgAction::SetTrue)
                        .help("Also substitute false, 0, and empty strings"),
                )
                .arg(
                    Arg::new("no-replace-falsy")
                        .long("no-replace-falsy")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("replace-falsy")
                        .help("Substitute only null and undefined, even if the config enables falsy"),
                )
                .arg(
                    Arg::new("max-depth")
                        .long("max-depth")
                        .value_parser(value_parser!(usize))
                        .help("Recursion ceiling"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducible substitutes"),
                )
                .arg(
                    Arg::new("extended")
                        .long("extended")
                        .action(ArgAction::SetTrue)
                        .help("Recognise $date, $regex, $pending and $type objects"),
                )
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .action(ArgAction::SetTrue)
                        .help("Print on a single line"),
                )
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("palette")
                .about("Print the active palette")
                .arg(config_arg()),
        )
}

fn main() -> Result<()> {
    init_tracing();
    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("transform", args)) => {
            let args = TransformArgs {
                input: args.get_one::<PathBuf>("input").cloned(),
                config: args.get_one::<PathBuf>("config").cloned(),
                replace_falsy: args.get_flag("replace-falsy"),
                no_replace_falsy: args.get_flag("no-replace-falsy"),
                max_depth: args.get_one::<usize>("max-depth").copied(),
                seed: args.get_one::<u64>("seed").copied(),
                extended: args.get_flag("extended"),
                compact: args.get_flag("compact"),
            };
            let input = read_input(args.input.as_deref())?;
            println!("{}", run_transform(&args, &input)?);
        }
        Some(("palette", args)) => {
            println!("{}", run_palette(args.get_one::<PathBuf>("config").cloned())?);
        }
        _ => unreachable!("subcommand_required"),
    }
    Ok(())
}
