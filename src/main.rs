use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    modrelay::app::startup::startup().await
}
