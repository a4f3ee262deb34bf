//! Data models
//!
//! Every record serializes with camelCase keys, the layout of the
//! persisted JSON document.

pub mod category;
pub mod dining_table;
pub mod menu_item;
pub mod order;
pub mod session;
pub mod staff_call;
pub mod user;

pub use category::*;
pub use dining_table::*;
pub use menu_item::*;
pub use order::*;
pub use session::*;
pub use staff_call::*;
pub use user::*;

pub(crate) fn default_true() -> bool {
    true
}
