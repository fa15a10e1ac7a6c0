use std::path::PathBuf;

use clap::{ArgAction, ArgMatches};
use const_format::formatcp;

use deposit_calc::cli;
use deposit_calc::core::GenericResult;
use deposit_calc::deposits::{RawApplicationInput, RawValue};
use deposit_calc::time;

use super::action::{Action, OutputFormat};

const DEFAULT_CONFIG_DIR_PATH: &str = "~/.deposit-calc";

pub struct Parser {
    matches: Option<ArgMatches>,
}

pub struct GlobalOptions {
    pub log_level: log::Level,
    pub config_dir: String,
}

impl Parser {
    pub fn new() -> Parser {
        Parser {matches: None}
    }

    pub fn parse_global(&mut self) -> GenericResult<GlobalOptions> {
        let app = cli::new_app("deposit-calc", "Validates deposit applications and projects monthly compounding balances")
            .version(env!("CARGO_PKG_VERSION"))
            .subcommand_required(true)
            .arg_required_else_help(true)
            .args([
                cli::new_arg("config", formatcp!("Configuration directory path [default: {}]", DEFAULT_CONFIG_DIR_PATH))
                    .short('c').long("config")
                    .value_name("PATH"),

                cli::new_arg("verbose", "Set verbosity level")
                    .short('v').long("verbose")
                    .action(ArgAction::Count),
            ])

            .subcommand(cli::new_subcommand(
                "calc", "Calculate monthly deposit balances")
                .long_about("\
                    Validates the deposit application and calculates month-end balances of the \
                    deposit with monthly capitalization.")
                .args([
                    cli::new_arg("date", "Application date (in DD.MM.YYYY format) [default: today]")
                        .short('d').long("date")
                        .value_name("DATE"),

                    cli::new_arg("periods", "Deposit term in months")
                        .short('p').long("periods")
                        .value_name("MONTHS")
                        .required(true),

                    cli::new_arg("amount", "Deposit amount")
                        .short('a').long("amount")
                        .value_name("AMOUNT")
                        .required(true),

                    cli::new_arg("rate", "Annual interest rate (in percents)")
                        .short('r').long("rate")
                        .value_name("RATE")
                        .required(true),

                    cli::new_arg("format", "Output format")
                        .short('f').long("format")
                        .value_name("FORMAT")
                        .value_parser(["table", "json"])
                        .default_value("table"),
                ]))

            .subcommand(cli::new_subcommand(
                "request", "Process a JSON calculation request")
                .long_about("\
                    Reads a JSON request with dt, periods, amount and rate keys and prints the \
                    reply: a statement date to balance mapping or an error message.")
                .arg(cli::new_arg("PATH", "Path to read the request from [default: stdin]")));

        let matches = app.get_matches();

        let log_level = match matches.get_count("verbose") {
            0 => log::Level::Info,
            1 => log::Level::Debug,
            2 => log::Level::Trace,
            _ => return Err!("Invalid verbosity level"),
        };

        let config_dir = matches.get_one::<String>("config").cloned().unwrap_or_else(||
            shellexpand::tilde(DEFAULT_CONFIG_DIR_PATH).to_string());

        self.matches = Some(matches);

        Ok(GlobalOptions {log_level, config_dir})
    }

    pub fn parse(mut self) -> GenericResult<Action> {
        let matches = self.matches.take().ok_or("Command line arguments haven't been parsed")?;
        let (command, matches) = matches.subcommand().ok_or("No command specified")?;
        parse_command(command, matches)
    }
}

fn parse_command(command: &str, matches: &ArgMatches) -> GenericResult<Action> {
    Ok(match command {
        "calc" => {
            let date = match matches.get_one::<String>("date") {
                Some(date) => RawValue::from(date.as_str()),
                None => RawValue::Date(time::today()),
            };

            let format = match get_value(matches, "format")? {
                "table" => OutputFormat::Table,
                "json" => OutputFormat::Json,
                format => return Err!("Invalid output format: {:?}", format),
            };

            Action::Calc {
                input: RawApplicationInput::new(
                    date,
                    get_value(matches, "periods")?,
                    get_value(matches, "amount")?,
                    get_value(matches, "rate")?,
                ),
                format,
            }
        },

        "request" => Action::Request {
            path: matches.get_one::<String>("PATH")
                .filter(|path| path.as_str() != "-")
                .map(PathBuf::from),
        },

        _ => return Err!("Unsupported command: {:?}", command),
    })
}

fn get_value<'a>(matches: &'a ArgMatches, name: &str) -> GenericResult<&'a str> {
    Ok(matches.get_one::<String>(name).map(String::as_str).ok_or_else(|| format!(
        "{} is not specified", name))?)
}
