pub use talking_trump::api::handler;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    // Local runs pick up credentials from .env; Lambda has none
    let _ = dotenvy::dotenv();
    talking_trump::setup_logging();
    lambda_runtime::run(lambda_runtime::service_fn(handler)).await
}
