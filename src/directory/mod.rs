//! In-memory member and team directory.
//!
//! Backs the JSON resources the UI components fetch. Users registered here
//! show up in `GET /members`; teams are plain CRUD records.
//!
//! # Example
//!
//! ```rust
//! use team_roster::directory::Directory;
//!
//! let directory = Directory::new(vec!["Member1".to_string()]);
//! directory.register("Alice", "alice@example.com").unwrap();
//!
//! assert_eq!(directory.members(), vec!["Member1", "Alice"]);
//! ```

mod store;

pub use store::{Directory, DirectoryError, Team, TeamDraft, User};
