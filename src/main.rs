use clap::Parser;
use logroll::cli::Cli;
use logroll::theme::Theme;
use logroll::RotationError;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", Theme::error("Error:"), e);
            let code = e
                .downcast_ref::<RotationError>()
                .map(RotationError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
