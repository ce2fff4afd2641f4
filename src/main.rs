#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    blogist::run().await
}
