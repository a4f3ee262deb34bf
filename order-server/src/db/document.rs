use serde::{Deserialize, Serialize};
use shared::models::{Category, MenuItem, Order, StaffCall, Table, User};

/// The persisted document: every collection plus a write counter.
///
/// Files written before `version` existed load with version 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub version: u64,
    pub users: Vec<User>,
    pub tables: Vec<Table>,
    pub menu_items: Vec<MenuItem>,
    pub orders: Vec<Order>,
    pub categories: Vec<Category>,
    pub staff_calls: Vec<StaffCall>,
}
