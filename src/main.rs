/*
 * Responsibility
 * - start the tokio runtime and call app::run() (no logic here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    role_gate::app::run().await
}
