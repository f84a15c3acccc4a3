use std::process::ExitCode;

fn main() -> ExitCode {
    pixy_cli::run()
}
