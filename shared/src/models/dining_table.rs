//! Dining Table Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const TABLE_ID_PREFIX: &str = "table-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
            TableStatus::Reserved => "reserved",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(TableStatus::Available),
            "occupied" => Ok(TableStatus::Occupied),
            "reserved" => Ok(TableStatus::Reserved),
            other => Err(other.to_string()),
        }
    }
}

/// Dining table entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,
    pub number: u32,
    pub capacity: u32,
    pub status: TableStatus,
    /// Printed label, `QR_TABLE_<number>`
    pub qr_code: String,
}

impl Table {
    pub fn qr_label(number: u32) -> String {
        format!("QR_TABLE_{number}")
    }

    /// URL encoded into the table's QR code
    pub fn qr_code_data(base_url: &str, table_id: &str) -> String {
        format!("{}/table/{table_id}", base_url.trim_end_matches('/'))
    }
}

/// Table number as shown to staff: the id without its `table-` prefix
pub fn table_number_label(table_id: &str) -> &str {
    table_id.strip_prefix(TABLE_ID_PREFIX).unwrap_or(table_id)
}

/// Create dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCreate {
    pub number: Option<i64>,
    pub capacity: Option<i64>,
}

/// Update dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableUpdate {
    #[serde(alias = "id")]
    pub table_id: Option<String>,
    pub status: Option<String>,
}

/// QR payload for a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableQrCode {
    pub table_id: String,
    pub qr_code_data: String,
}
