use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    wordfall::cli::run_cli().await
}
