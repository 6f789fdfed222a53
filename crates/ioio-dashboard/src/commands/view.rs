//! `view`: every field of one record.

use clap::Args;
use ioio_core::{RecordId, RecordKind};

use crate::client::ApiClient;
use crate::render;

/// Arguments for `view`.
#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// Record kind: `property` or `service`.
    pub kind: RecordKind,

    /// Record id.
    pub id: String,
}

/// Look the record up in its kind's list and print the detail view.
pub async fn run_view(args: &ViewArgs, client: &ApiClient) -> anyhow::Result<u8> {
    let id = RecordId::from_path(&args.id);
    let rows = client.list(args.kind).await?;
    let found = rows
        .iter()
        .find(|row| row.get("id").is_some_and(|v| id.matches(v)));

    match found {
        Some(row) => {
            print!("{}", render::render_detail(args.kind, row));
            Ok(0)
        }
        None => {
            eprintln!("{} {id} not found", args.kind.title());
            Ok(1)
        }
    }
}
