use std::env::args_os;
use std::process::ExitCode;

use huffman_codec::{run, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match run(&arguments) {
        Ok(statistics) => {
            println!("{}", statistics.report(&arguments));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} failed because of: {}", arguments.mode(), e);
            ExitCode::FAILURE
        }
    }
}
