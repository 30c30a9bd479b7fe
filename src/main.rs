#[tokio::main]
async fn main() {
    sketchly_be::start_server().await;
}
