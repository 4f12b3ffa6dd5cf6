use anyhow::{Result, bail};
use briefdesk_core::api::ApiClient;

pub async fn check(api: &ApiClient) -> Result<()> {
    let health = api.health().await?;
    if !health.is_ok() {
        bail!("{} reported status '{}'", api.base_url(), health.status);
    }
    println!("✓ {} is up ({})", api.base_url(), health.status);
    Ok(())
}
