//! Client command handlers.

use anyhow::{Result, bail};
use briefdesk_core::api::ApiClient;
use briefdesk_core::display;
use briefdesk_core::models::{ClientUpdate, NewClient};

pub async fn list(api: &ApiClient) -> Result<()> {
    let clients = api.clients().list().await?;
    if clients.is_empty() {
        println!("No clients yet.");
        return Ok(());
    }
    println!("{}", display::clients_table(&clients));
    Ok(())
}

pub async fn show(api: &ApiClient, id: &str) -> Result<()> {
    let client = api.clients().get(id).await?;
    print!("{}", display::render_client(&client));
    Ok(())
}

pub async fn create(
    api: &ApiClient,
    name: String,
    description: String,
    meeting_notes: Option<String>,
) -> Result<()> {
    let client = api
        .clients()
        .create(&NewClient {
            name,
            description,
            meeting_notes,
        })
        .await?;
    println!("✓ Created client {} ({})", client.name, client.id);
    Ok(())
}

pub async fn update(
    api: &ApiClient,
    id: &str,
    name: Option<String>,
    description: Option<String>,
    meeting_notes: Option<String>,
) -> Result<()> {
    let update = ClientUpdate {
        name,
        description,
        meeting_notes,
    };
    if update.is_empty() {
        bail!("Nothing to update: pass --name, --description or --notes");
    }

    let client = api.clients().update(id, &update).await?;
    println!("✓ Updated client {}", client.name);
    Ok(())
}

pub async fn delete(api: &ApiClient, id: &str) -> Result<()> {
    api.clients().delete(id).await?;
    println!("✓ Deleted client {id}");
    Ok(())
}
