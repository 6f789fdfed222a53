//! `show`: statistics and both tables.

use chrono::Utc;
use clap::Args;

use crate::client::ApiClient;
use crate::render::{self, TimeDisplay};
use crate::snapshot::Snapshot;

/// Arguments for `show`.
#[derive(Args, Debug, Default, Clone)]
pub struct ShowArgs {
    /// Only list records with a field containing this text (case-insensitive).
    #[arg(long, short)]
    pub search: Option<String>,
}

/// Fetch both kinds and print the dashboard.
///
/// Always exits 0: failed sections are shown inline, not treated as fatal.
pub async fn run_show(args: &ShowArgs, client: &ApiClient) -> anyhow::Result<u8> {
    let snapshot = Snapshot::fetch(client).await;
    let now = Utc::now();
    let stats = snapshot.stats(now);

    let shown = match args.search.as_deref() {
        Some(term) if !term.trim().is_empty() => {
            tracing::debug!(term, "filtering dashboard");
            snapshot.filtered(term)
        }
        _ => snapshot,
    };

    let time = TimeDisplay::local();
    println!("{}", render::render_generated_at(now, &time));
    if let Some(term) = args.search.as_deref().filter(|t| !t.trim().is_empty()) {
        println!("Filter: {term:?}");
    }
    print!("{}", render::render_dashboard_in(&stats, &shown, &time));
    Ok(0)
}
