//! DataGrid Navigator - comments dashboard with persisted table state
//!
//! Core modules:
//! - `table`: Search, tri-state sort and pagination over a fixed record set
//! - `persistence`: Values mirrored into a durable key-value store
//! - `platform`: Browser/native abstraction (storage backends, HTTP fetch)
//! - `model`: Comment and user records as served by the REST API
//! - `render`: Text rendering of the table and the profile card
//! - `settings`: Runtime configuration

pub mod error;
pub mod model;
pub mod persistence;
pub mod platform;
pub mod render;
pub mod settings;
pub mod table;

pub use error::{FetchError, StorageError};
pub use model::{Comment, User};
pub use persistence::PersistentValue;
pub use platform::storage::{KeyValueStore, MemoryStore};
pub use settings::Settings;
pub use table::{PageSummary, SortConfig, SortDirection, SortKey, TableController, TablePage};

/// Application constants
pub mod consts {
    /// Default REST API base URL
    pub const DEFAULT_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

    /// Storage keys for the persisted table state
    pub const SEARCH_TERM_KEY: &str = "comments_searchTerm";
    pub const SORT_CONFIG_KEY: &str = "comments_sortConfig";
    pub const CURRENT_PAGE_KEY: &str = "comments_currentPage";
    pub const PAGE_SIZE_KEY: &str = "comments_pageSize";

    /// Rows shown per page until the user picks another size
    pub const DEFAULT_PAGE_SIZE: usize = 10;
    /// Choices offered by the rows-per-page selector
    pub const PAGE_SIZE_OPTIONS: [usize; 3] = [10, 50, 100];
}
