#[tokio::main]
async fn main() -> anyhow::Result<()> {
    moodbot::run_bot().await
}
