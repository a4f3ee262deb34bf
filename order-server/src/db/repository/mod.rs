//! Repository Module
//!
//! Typed operations over the [`JsonStore`](super::JsonStore) document, one
//! repository per collection. Reads take a snapshot; writes go through
//! `JsonStore::mutate` so each change is one locked read-modify-write.

pub mod category;
pub mod dining_table;
pub mod menu_item;
pub mod order;
pub mod staff_call;
pub mod stats;
pub mod user;

pub use category::CategoryRepository;
pub use dining_table::DiningTableRepository;
pub use menu_item::MenuItemRepository;
pub use order::{OrderFilter, OrderRepository, PaymentCompletion};
pub use staff_call::StaffCallRepository;
pub use stats::{DashboardStats, StatsRepository};
pub use user::{UserPatch, UserRepository};

use shared::error::AppError;

pub type RepoResult<T> = Result<T, AppError>;
