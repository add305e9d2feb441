#[tokio::main]
async fn main() {
    event_report_backend::run().await;
}
