use std::process::ExitCode;

fn main() -> ExitCode {
    // Delegate to CLI runner; errors are printed nicely here.
    match techusage::cli::run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
