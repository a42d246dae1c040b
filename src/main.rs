use std::process::ExitCode;

fn main() -> ExitCode {
    match est_stats::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("{err:?}");
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
