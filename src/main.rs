#[actix_web::main]
async fn main() -> std::io::Result<()> {
    citydir::run().await
}
