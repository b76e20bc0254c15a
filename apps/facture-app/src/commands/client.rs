//! # Client Commands
//!
//! Listing and editing the client workbook.

use facture_core::{Client, NewClient, RecordId};
use facture_store::RecordRepository;
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;

/// Returns every client, in workbook order.
pub fn list_clients(state: &AppState) -> ApiResult<Vec<Client>> {
    Ok(state.store.clients().list_all()?)
}

/// Validates and appends a client, returning it with its new id.
pub fn add_client(state: &AppState, draft: NewClient) -> ApiResult<Client> {
    let client = state.store.clients().append(draft)?;
    info!(id = client.id, name = %client.name, "Client added");
    Ok(client)
}

pub fn delete_client(state: &AppState, id: RecordId) -> ApiResult<()> {
    state.store.clients().delete_by_id(id)?;
    Ok(())
}
