mod action;
mod parser;

#[macro_use] extern crate deposit_calc;

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;

use log::{debug, error};

use deposit_calc::config::Config;
use deposit_calc::core::{EmptyResult, GenericResult};
use deposit_calc::deposits::{self, RawApplicationInput, request};

use self::action::{Action, OutputFormat};
use self::parser::{Parser, GlobalOptions};

fn main() -> ExitCode {
    let mut parser = Parser::new();

    let global = match parser.parse_global() {
        Ok(global) => global,
        Err(err) => {
            let _ = writeln!(io::stderr(), "{err}.");
            return ExitCode::FAILURE;
        },
    };

    if let Err(err) = easy_logging::init(module_path!(), global.log_level) {
        let _ = writeln!(io::stderr(), "Failed to initialize the logging: {err}.");
        return ExitCode::FAILURE;
    }

    if let Err(err) = run(global, parser) {
        let message = err.to_string();

        if message.contains('\n') {
            error!("{err}");
        } else {
            error!("{err}.");
        }

        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(global: GlobalOptions, parser: Parser) -> EmptyResult {
    let config = Config::new(&global.config_dir)?;

    match parser.parse()? {
        Action::Calc {input, format} => calculate(&config, &input, format)?,
        Action::Request {path} => {
            let body = read_request(path.as_deref())?;

            let reply = request::handle(&body, &config);
            println!("{}", reply.body);

            if !reply.is_success() {
                return Err!("The request has been rejected with {} status", reply.status);
            }
        },
    };

    Ok(())
}

fn calculate(config: &Config, input: &RawApplicationInput, format: OutputFormat) -> EmptyResult {
    let application = config.validator().validate(input)?;
    let schedule = deposits::compute_schedule_with(&application, config.balance_carry);

    match format {
        OutputFormat::Table => deposits::print_schedule(&application, &schedule),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&schedule)?),
    }

    if let Some(balance) = schedule.final_balance() {
        debug!("Final balance: {:.2}.", balance);
    }

    Ok(())
}

fn read_request(path: Option<&Path>) -> GenericResult<String> {
    Ok(match path {
        Some(path) => fs::read_to_string(path).map_err(|e| format!(
            "Failed to read {:?}: {}", path, e))?,
        None => {
            let mut body = String::new();
            io::stdin().read_to_string(&mut body).map_err(|e| format!(
                "Failed to read the request from stdin: {}", e))?;
            body
        },
    })
}
