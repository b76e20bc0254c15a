//! # Commands Module
//!
//! Every operation the CLI exposes, as plain functions over [`AppState`].
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── document.rs  ◄─── generate_document, list_document_kinds
//! ├── client.rs    ◄─── Client list/add/delete
//! └── item.rs      ◄─── Item list/add/delete
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  facture generate --kind invoice --client 1 --item 3:2                  │
//! │         │                                                               │
//! │         │ (clap parsing in lib.rs)                                      │
//! │         ▼                                                               │
//! │  generate_document(                                                     │
//! │      state: &AppState,            ◄── Built once in run()               │
//! │      input: GenerateDocumentInput ◄── Raw user strings                  │
//! │  ) -> ApiResult<GeneratedDocumentDto>                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Human-readable text, or JSON with --json                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`AppState`]: crate::state::AppState

pub mod client;
pub mod document;
pub mod item;
