//! Todo and category domain for Todocast.
//!
//! - Domain types with validated construction (`Owner`, `Priority`, `Status`, ...)
//! - `TodoReducer` and `CategoryReducer`, run inside a `todocast_runtime::Store`
//! - Pure queries and statistics over a snapshot of one owner's todos
//!
//! # Quick Start
//!
//! ```no_run
//! use todocast_todos::{Owner, TodoAction, TodoDraft, TodoEnvironment, TodoReducer, TodoState};
//! use todocast_core::environment::{RandomIds, SystemClock};
//! use todocast_runtime::Store;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = TodoEnvironment::new(Arc::new(SystemClock), Arc::new(RandomIds));
//! let store = Store::new(TodoState::new(), TodoReducer::new(), env);
//!
//! let owner = Owner::parse("ayse")?;
//! let event = store
//!     .send(TodoAction::Create {
//!         owner: owner.clone(),
//!         draft: TodoDraft::new("Buy milk"),
//!     })
//!     .await?;
//!
//! let todos = store.state(|s| s.owned_by(&owner)).await;
//! println!("{} todos, created {:?}", todos.len(), event.todo().map(|t| t.id));
//! # Ok(())
//! # }
//! ```

pub mod category;
pub mod error;
pub mod query;
pub mod reducer;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use category::{CategoryAction, CategoryReducer, CategoryState};
pub use error::TodoError;
pub use query::TodoQuery;
pub use reducer::{TodoAction, TodoEnvironment, TodoEvent, TodoReducer};
pub use stats::{TodoStatistics, statistics};
pub use types::{
    Category, CategoryId, Owner, Priority, Status, Todo, TodoDraft, TodoId, TodoPatch, TodoState,
};
