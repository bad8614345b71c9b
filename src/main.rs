use std::process::ExitCode;

fn main() -> ExitCode {
    lispy::cli::run()
}
