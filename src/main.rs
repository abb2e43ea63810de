use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = quiver_md::run() {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
