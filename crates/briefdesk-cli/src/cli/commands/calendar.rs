//! Google Calendar command handlers.

use std::env;

use anyhow::Result;
use briefdesk_core::api::ApiClient;
use briefdesk_core::display;

/// Set to skip opening a browser during `calendar connect`.
const NO_BROWSER_ENV: &str = "BRIEFDESK_NO_BROWSER";

pub async fn status(api: &ApiClient) -> Result<()> {
    let status = api.integrations().connection_status().await?;
    if !status.is_connected {
        println!("Google Calendar is not connected. Run `briefdesk calendar connect`.");
        return Ok(());
    }

    print!("✓ Google Calendar connected");
    if let Some(email) = status.email.as_deref() {
        print!(" as {email}");
    }
    if let Some(since) = status.connected_at.as_deref() {
        print!(" since {}", display::format_date(since));
    }
    println!();
    Ok(())
}

pub async fn connect(api: &ApiClient) -> Result<()> {
    let auth = api.integrations().authorization_url().await?;

    println!("To connect Google Calendar:");
    println!();
    println!("  1. A browser window will open (or visit the URL below)");
    println!("  2. Grant calendar access");
    println!("  3. Run `briefdesk calendar callback --code <CODE> --state <STATE>`");
    println!("     with the values from the redirect URL");
    println!();
    println!("Authorization URL:");
    println!("  {}", auth.authorization_url);

    // best effort, skip in tests
    if env::var_os(NO_BROWSER_ENV).is_none()
        && let Err(e) = open::that(&auth.authorization_url)
    {
        tracing::debug!(error = %e, "could not open browser");
    }
    Ok(())
}

pub async fn callback(api: &ApiClient, code: &str, state: &str) -> Result<()> {
    let response = api.integrations().complete_callback(code, state).await?;
    match response.get("message").and_then(|m| m.as_str()) {
        Some(message) => println!("✓ {message}"),
        None => println!("✓ Google Calendar connected"),
    }
    Ok(())
}

pub async fn meetings(api: &ApiClient) -> Result<()> {
    let meetings = api.integrations().upcoming_meetings().await?;
    if meetings.is_empty() {
        println!("No upcoming meetings.");
        return Ok(());
    }
    println!("{}", display::meetings_table(&meetings));
    Ok(())
}
