//! The computer-parts inventory domain built on the PartsDB runtime.
//!
//! ## Crate layout
//! - `category` / `item`: the two catalog entities with their form
//!   pipelines.
//! - `ops`: the write and read orchestrators behind every route.
//! - `image`: durable storage for item images.
//! - `config`: injected configuration (admin secret, image policy).
//! - `fixtures`: the demo catalog seed.

pub mod category;
pub mod config;
pub mod domain;
pub mod fixtures;
pub mod image;
pub mod item;
pub mod ops;

pub use category::{Category, CategoryDraft, CategoryForm};
pub use config::{AdminPassword, CatalogConfig};
pub use domain::{CatalogDomain, db, session};
pub use image::{DirImageStore, ImageError, ImageName, ImageStore, ImageUpload};
pub use item::{Item, ItemDraft, ItemForm};
pub use ops::{Catalog, ItemSummary, Outcome, Page};
