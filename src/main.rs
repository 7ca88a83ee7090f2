//! gh-signoff binary entry point

use std::process::ExitCode;

use signoff::cli::{self, Cli};

fn main() -> ExitCode {
    cli::install_panic_hook();

    let args = match Cli::try_parse_args() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            // --help and --version are not failures
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    cli::run(args)
}
