use anyhow::{Context, bail};

use storefront_core::OrderNumber;
use storefront_infra::{GatewayConfig, PgProductGateway};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let numbers = std::env::args()
        .skip(1)
        .map(|arg| OrderNumber::new(arg).context("invalid order number"))
        .collect::<anyhow::Result<Vec<_>>>()?;
    if numbers.is_empty() {
        bail!("usage: storefront-minis <ORDER_NUMBER>...");
    }

    let config = GatewayConfig::from_env()?;
    let pool = config.connect().await?;
    let gateway = PgProductGateway::from_pool(pool, config.schema.clone());

    let minis = gateway.get_minis(numbers).await?;
    tracing::info!(found = minis.len(), "loaded mini products");

    println!("{}", serde_json::to_string_pretty(&minis)?);
    Ok(())
}
