//! `delete`: remove one record through the API.

use std::io::{BufRead, Write};

use clap::Args;
use ioio_core::{RecordId, RecordKind};

use crate::client::ApiClient;

/// Arguments for `delete`.
#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// Record kind: `property` or `service`.
    pub kind: RecordKind,

    /// Record id.
    pub id: String,

    /// Skip the confirmation prompt.
    #[arg(long, short)]
    pub yes: bool,
}

/// True if the answer is an explicit yes.
pub fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn confirm(kind: RecordKind, id: &RecordId) -> anyhow::Result<bool> {
    print!("Are you sure you want to delete {kind} {id}? [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(is_confirmation(&answer))
}

/// Ask for confirmation (unless `--yes`), delete, and report what the API said.
pub async fn run_delete(args: &DeleteArgs, client: &ApiClient) -> anyhow::Result<u8> {
    let id = RecordId::from_path(&args.id);
    if !args.yes && !confirm(args.kind, &id)? {
        println!("Cancelled.");
        return Ok(0);
    }

    match client.delete(args.kind, &id).await {
        Ok(row) => {
            let name = row.get("name").and_then(|v| v.as_str()).unwrap_or("");
            println!("Deleted {} {id} {name}", args.kind);
            Ok(0)
        }
        Err(e) => {
            tracing::debug!(error = %e, "delete failed");
            eprintln!("Delete failed: {}", e.user_message());
            Ok(1)
        }
    }
}
