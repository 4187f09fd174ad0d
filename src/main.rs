#[tokio::main]
async fn main() -> anyhow::Result<()> {
    macro_dashboard::run().await
}
