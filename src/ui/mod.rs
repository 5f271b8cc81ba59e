//! UI components and the view tree they render into.
//!
//! # Structure
//!
//! - [`view`]: [`Node`] tree, [`Component`] trait and HTML serialization
//! - [`mount`]: fetch-on-mount lifecycle with cancellation
//! - [`app`]: [`AppShell`], the member roster
//! - [`login`]: [`LoginView`]
//! - [`page`]: mount-settle-render of a whole [`Page`]
//! - [`components`]: reusable building blocks

pub mod app;
pub mod components;
pub mod login;
pub mod mount;
pub mod page;
pub mod view;

pub use app::{AppShell, MemberListResponse};
pub use login::{LoginResponse, LoginView};
pub use mount::{FetchState, Mounted};
pub use page::{Page, render_page};
pub use view::{Component, Node};
