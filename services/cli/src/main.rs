//! Interactive driver
//!
//! Reads commands line by line from standard input until EOF or an exit
//! command, writing one formatted result line per input line.

mod app;
mod command;
mod errors;
mod parser;
mod printer;
mod tokenizer;

use std::io::{self, BufRead};

use app::{CliApp, DispatchResult};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    println!("Spot exchange core ready");
    println!("{}", printer::help_text());
    println!();

    let mut app = CliApp::new();
    let stdin = io::stdin();

    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };

        match parser::parse_command(&line) {
            Err(error) => {
                tracing::warn!(
                    app_code = %errors::AppErrorCode::InvalidInput,
                    parse_code = %error.code,
                    column = error.column,
                    "rejected input line"
                );
                println!("{}", printer::format_parse_error(&error));
            }
            Ok(command) => {
                let result = app.dispatch(command);
                println!("{}", printer::format_dispatch_result(&result));

                if result == DispatchResult::ExitRequested {
                    break;
                }
            }
        }
    }
}
