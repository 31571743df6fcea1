//! HTTP request handlers.

pub(crate) mod config;
pub(crate) mod landing;
pub(crate) mod navigation;
pub(crate) mod pages;
pub(crate) mod search;
