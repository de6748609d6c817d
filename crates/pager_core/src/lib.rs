//! Pager core: pure pagination state machines and view-model helpers.
mod effect;
mod identified;
mod msg;
mod page;
pub mod process;
mod rules;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, WaiterId, WaiterRejection};
pub use identified::{Identified, IdentifiedVec};
pub use msg::Msg;
pub use page::{Page, PageInfo};
pub use process::{ProcessHost, ProcessMsg, ProcessStatus, RequestId};
pub use rules::PageRules;
pub use state::{PageLoading, PaginationState};
pub use update::update;
pub use view_model::PaginationView;
