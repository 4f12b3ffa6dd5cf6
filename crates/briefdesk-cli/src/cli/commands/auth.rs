//! Auth command handlers.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result, bail};
use briefdesk_core::api::ApiClient;
use briefdesk_core::auth::mask_token;
use briefdesk_core::config::paths;

pub async fn login(api: &ApiClient, email: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        bail!("Email cannot be empty");
    }

    let password = read_password()?;
    let grant = api
        .login(email, &password)
        .await
        .with_context(|| format!("log in as {email}"))?;

    println!(
        "✓ Logged in as {email} (token: {})",
        mask_token(&grant.access_token)
    );
    println!("  Tokens saved to: {}", paths::tokens_path().display());
    Ok(())
}

pub fn logout(api: &ApiClient) -> Result<()> {
    let had_tokens = api.tokens().clear().context("clear stored tokens")?;

    if had_tokens {
        println!("✓ Logged out");
        println!("  Tokens removed from: {}", paths::tokens_path().display());
    } else {
        println!("Not logged in (no tokens found).");
    }
    Ok(())
}

pub async fn whoami(api: &ApiClient) -> Result<()> {
    if api.tokens().access_token().is_none() && api.tokens().refresh_token().is_none() {
        println!("Not logged in. Run `briefdesk login --email <EMAIL>`.");
        return Ok(());
    }

    let user = api.users().me().await?;
    match user.name.as_deref().filter(|n| !n.is_empty()) {
        Some(name) => println!("{name} <{}>", user.email),
        None => println!("{}", user.email),
    }
    Ok(())
}

/// Reads one line from stdin, prompting only when attached to a terminal.
fn read_password() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        print!("Password: ");
        io::stdout().flush()?;
    }

    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("read password from stdin")?;

    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        bail!("Password cannot be empty");
    }
    Ok(password.to_string())
}
