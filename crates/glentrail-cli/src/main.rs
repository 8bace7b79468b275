#![forbid(unsafe_code)]

use std::process::ExitCode;

fn main() -> ExitCode {
    glentrail_cli::main_entry()
}
