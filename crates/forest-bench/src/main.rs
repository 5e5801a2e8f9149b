use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    match forest_bench::run() {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failures) => {
            tracing::error!(failures, "benchmark finished with failures");
            ExitCode::FAILURE
        }
        Err(err) => {
            tracing::error!(error = %err, "benchmark run aborted");
            ExitCode::FAILURE
        }
    }
}
