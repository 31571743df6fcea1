//! Navigation model for Luma sites.
//!
//! The navigation tree comes from the `navigation` list of the site
//! configuration. This crate provides:
//!
//! - [`NavigationItem`]: the tagged tree of pages, links, references,
//!   sections and tabs
//! - [`flatten`] / [`find_route`]: routed documents in display order
//! - [`SideNav`]: the side navigation view model for a route
//! - [`Router`]: the seam to whatever hosts the current location
//!
//! # Example
//!
//! ```
//! use luma_navigation::{NavigationItem, Page, SideNav};
//!
//! let items = vec![NavigationItem::Page(Page {
//!     title: "Intro".to_owned(),
//!     path: "intro.md".to_owned(),
//! })];
//!
//! let nav = SideNav::build(&items, "/intro");
//! assert_eq!(nav.active_href(), Some("/intro"));
//! ```

mod item;
mod route;
mod sidenav;

pub use item::{
    Group, Link, NavigationItem, Page, Reference, RoutedEntry, find_route, flatten,
    landing_destination, route_for,
};
pub use route::{MemoryRouter, Router, route_fragment, strip_route};
pub use sidenav::{SideNav, SideNavEntry};
