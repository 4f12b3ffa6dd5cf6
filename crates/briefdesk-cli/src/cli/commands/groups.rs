use anyhow::Result;
use briefdesk_core::api::ApiClient;
use briefdesk_core::display;
use briefdesk_core::models::NewGroup;

pub async fn list(api: &ApiClient) -> Result<()> {
    let groups = api.groups().list().await?;
    if groups.is_empty() {
        println!("No groups yet.");
        return Ok(());
    }
    println!("{}", display::groups_table(&groups));
    Ok(())
}

pub async fn show(api: &ApiClient, id: &str) -> Result<()> {
    let group = api.groups().get(id).await?;
    println!("{}", group.name);
    println!("ID: {}", group.id);
    if let Some(description) = group.description.as_deref().filter(|d| !d.is_empty()) {
        println!();
        println!("{description}");
    }
    Ok(())
}

pub async fn create(api: &ApiClient, name: String, description: Option<String>) -> Result<()> {
    let group = api.groups().create(&NewGroup { name, description }).await?;
    println!("✓ Created group {} ({})", group.name, group.id);
    Ok(())
}
