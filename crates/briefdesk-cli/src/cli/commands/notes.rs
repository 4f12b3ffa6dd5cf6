//! Meeting notes command handlers.

use anyhow::{Result, bail};
use briefdesk_core::api::ApiClient;
use briefdesk_core::display;
use briefdesk_core::models::{NewNote, NoteUpdate};

pub async fn list(api: &ApiClient) -> Result<()> {
    let notes = api.notes().list().await?;
    if notes.is_empty() {
        println!("No notes yet.");
        return Ok(());
    }
    println!("{}", display::notes_table(&notes));
    Ok(())
}

pub async fn show(api: &ApiClient, id: &str) -> Result<()> {
    let note = api.notes().get(id).await?;
    print!("{}", display::render_note(&note));
    Ok(())
}

pub async fn create(
    api: &ApiClient,
    client_name: String,
    meeting_date: String,
    content: String,
) -> Result<()> {
    let note = api
        .notes()
        .create(&NewNote {
            client_name,
            meeting_date,
            content,
        })
        .await?;
    println!("✓ Created note {} for {}", note.id, note.client_name);
    Ok(())
}

pub async fn update(
    api: &ApiClient,
    id: &str,
    client_name: Option<String>,
    meeting_date: Option<String>,
    content: Option<String>,
) -> Result<()> {
    let update = NoteUpdate {
        client_name,
        meeting_date,
        content,
    };
    if update.is_empty() {
        bail!("Nothing to update: pass --client, --date or --content");
    }

    let note = api.notes().update(id, &update).await?;
    println!("✓ Updated note {}", note.id);
    Ok(())
}

pub async fn delete(api: &ApiClient, id: &str) -> Result<()> {
    api.notes().delete(id).await?;
    println!("✓ Deleted note {id}");
    Ok(())
}
