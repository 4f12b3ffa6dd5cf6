//! Briefing command handlers.

use anyhow::{Context, Result};
use briefdesk_core::api::ApiClient;
use briefdesk_core::display;
use briefdesk_core::models::{Briefing, BriefingFeedback};
use briefdesk_core::resources::filter_by_client;

pub async fn list(api: &ApiClient, search: Option<&str>) -> Result<()> {
    let briefings = api.briefings().list().await?;
    print_list(&briefings, search.unwrap_or(""));
    Ok(())
}

pub async fn show(api: &ApiClient, id: &str) -> Result<()> {
    let briefing = api.briefings().get(id).await?;
    print!("{}", display::render_briefing(&briefing));
    Ok(())
}

pub async fn delete(api: &ApiClient, id: &str) -> Result<()> {
    api.briefings().delete(id).await?;
    println!("✓ Deleted briefing {id}");
    Ok(())
}

pub async fn feedback(api: &ApiClient, id: &str, feedback: BriefingFeedback) -> Result<()> {
    api.briefings().feedback(id, feedback).await?;
    let label = match feedback {
        BriefingFeedback::Helpful => "helpful",
        BriefingFeedback::NotHelpful => "not helpful",
    };
    println!("✓ Marked briefing {id} as {label}");
    Ok(())
}

/// Regenerates, then re-fetches so the printed list reflects the server.
pub async fn update(api: &ApiClient) -> Result<()> {
    api.briefings()
        .regenerate()
        .await
        .context("regenerate briefings")?;
    println!("✓ Briefings updated");

    let briefings = api.briefings().list().await?;
    print_list(&briefings, "");
    Ok(())
}

fn print_list(briefings: &[Briefing], search: &str) {
    let shown = filter_by_client(briefings, search);
    if shown.is_empty() {
        if search.trim().is_empty() {
            println!("No briefings yet.");
        } else {
            println!("No briefings match '{}'.", search.trim());
        }
        return;
    }
    println!("{}", display::briefings_table(&shown));
}
