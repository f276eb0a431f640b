use std::process::ExitCode;

fn main() -> ExitCode {
    match prime_timeline::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
