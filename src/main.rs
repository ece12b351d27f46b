#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tasksolver::run().await
}
