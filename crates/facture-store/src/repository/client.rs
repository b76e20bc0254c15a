//! # Client Repository
//!
//! Row layout of `clients.xlsx`:
//!
//! | A         | B    | C       | D     | E     | F         | G         | H         |
//! |-----------|------|---------|-------|-------|-----------|-----------|-----------|
//! | Client ID | Name | Address | Email | Phone | Fiscal ID | AI Number | RC Number |

use facture_core::{Client, NewClient, RecordId};

use super::{cell, SheetRecord, SheetRepository};
use crate::error::StoreResult;
use crate::sheet::CellValue;

/// Repository over `clients.xlsx`.
pub type ClientRepository = SheetRepository<Client>;

impl SheetRecord for Client {
    type Draft = NewClient;

    const ENTITY: &'static str = "Client";
    const FILE_NAME: &'static str = "clients.xlsx";
    const SHEET_NAME: &'static str = "Clients";
    const HEADERS: &'static [&'static str] = &[
        "Client ID",
        "Name",
        "Address",
        "Email",
        "Phone",
        "Fiscal ID",
        "AI Number",
        "RC Number",
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_row(id: RecordId, cells: &[String]) -> Self {
        Client {
            id,
            name: cell(cells, 1),
            address: cell(cells, 2),
            email: cell(cells, 3),
            phone: cell(cells, 4),
            fiscal_id: cell(cells, 5),
            ai_number: cell(cells, 6),
            rc_number: cell(cells, 7),
        }
    }

    fn to_row(&self) -> Vec<CellValue> {
        vec![
            CellValue::Number(f64::from(self.id)),
            CellValue::Text(self.name.clone()),
            CellValue::Text(self.address.clone()),
            CellValue::Text(self.email.clone()),
            CellValue::Text(self.phone.clone()),
            CellValue::Text(self.fiscal_id.clone()),
            CellValue::Text(self.ai_number.clone()),
            CellValue::Text(self.rc_number.clone()),
        ]
    }

    fn from_draft(draft: NewClient, id: RecordId) -> StoreResult<Self> {
        draft.validate()?;
        Ok(draft.into_client(id))
    }
}
