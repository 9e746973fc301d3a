mod category;
mod item;

use crate::{
    category::{Category, CategoryForm},
    config::CatalogConfig,
    domain::CatalogDomain,
    image::{ImageName, ImageStore, ImageUpload},
    item::{Item, ItemForm},
};
use partsdb::{
    Error, ErrorKind, ErrorOrigin,
    core::obs::sink::{MetricsEvent, record},
    prelude::*,
};
use serde::Serialize;

/// Field path used for admin-secret issues on gated forms.
pub const ADMIN_PASSWORD_FIELD: &str = "admin_password";

///
/// Outcome
///
/// What the presentation layer should do next: render a page context,
/// or redirect. Rejected submissions come back as `Render` with the
/// user's raw input and the collected issues; they are not errors.
///

#[derive(Debug, Serialize)]
pub enum Outcome {
    Render(Page),
    Redirect { path: String },
}

impl Outcome {
    pub(crate) fn redirect(path: impl Into<String>) -> Self {
        Self::Redirect { path: path.into() }
    }
}

///
/// ItemSummary
///
/// The item projection used on a category detail page.
///

#[derive(Clone, Debug, Serialize)]
pub struct ItemSummary {
    pub id: Id<Item>,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
}

impl From<&Item> for ItemSummary {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id(),
            name: item.name.clone(),
            price: item.price,
            stock: item.stock,
        }
    }
}

///
/// Page
///
/// One render context per view. `view()` names the template.
///

#[derive(Debug, Serialize)]
pub enum Page {
    CategoryList {
        categories: Vec<Category>,
    },
    CategoryDetail {
        category: Category,
        items: Vec<ItemSummary>,
    },
    CategoryForm {
        form: CategoryForm,
        errors: Issues,
        editing: Option<Id<Category>>,
    },
    CategoryDeleteConfirm {
        category: Category,
        item_count: u64,
        errors: Issues,
    },
    ItemList {
        items: Vec<Item>,
    },
    ItemDetail {
        item: Item,
        category: Category,
    },
    ItemForm {
        form: ItemForm,
        categories: Vec<Category>,
        errors: Issues,
        editing: Option<Id<Item>>,
    },
    ItemDeleteConfirm {
        item: Item,
        errors: Issues,
    },
}

impl Page {
    /// Template name for this context.
    #[must_use]
    pub const fn view(&self) -> &'static str {
        match self {
            Self::CategoryList { .. } => "categories/list",
            Self::CategoryDetail { .. } => "categories/detail",
            Self::CategoryForm { .. } => "categories/form",
            Self::CategoryDeleteConfirm { .. } => "categories/delete",
            Self::ItemList { .. } => "items/list",
            Self::ItemDetail { .. } => "items/detail",
            Self::ItemForm { .. } => "items/form",
            Self::ItemDeleteConfirm { .. } => "items/delete",
        }
    }
}

///
/// Catalog
///
/// The orchestrator behind every route: sequences staging, validation,
/// the admin gate, existence checks, and store mutations. Constructed
/// with its collaborators; holds no ambient state.
///

pub struct Catalog<I: ImageStore> {
    session: DbSession<CatalogDomain>,
    images: I,
    config: CatalogConfig,
}

impl<I: ImageStore> Catalog<I> {
    #[must_use]
    pub const fn new(db: Db<CatalogDomain>, images: I, config: CatalogConfig) -> Self {
        Self {
            session: DbSession::new(db),
            images,
            config,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &DbSession<CatalogDomain> {
        &self.session
    }

    #[must_use]
    pub const fn images(&self) -> &I {
        &self.images
    }

    // ------------------------------------------------------------------
    // Shared stages
    // ------------------------------------------------------------------

    /// Check the supplied admin secret against the injected one.
    /// A mismatch is a field-scoped issue, not a distinct failure.
    pub(crate) fn check_admin(
        &self,
        supplied: Option<&str>,
        errors: &mut Issues,
        entity_path: &'static str,
    ) {
        let ok = supplied.is_some_and(|candidate| self.config.admin_password.verify(candidate));

        if !ok {
            record(MetricsEvent::AdminRejected { entity_path });
            errors
                .entry(ADMIN_PASSWORD_FIELD.to_string())
                .or_default()
                .push("invalid admin password".to_string());
        }
    }

    pub(crate) const fn require_item_image(&self) -> bool {
        self.config.require_item_image
    }

    /// Stage an upload to durable storage ahead of validation.
    pub(crate) fn stage_image(&self, upload: &ImageUpload) -> Result<ImageName, Error> {
        let name = self.images.stage(upload)?;
        record(MetricsEvent::ImageStaged {
            entity_path: Item::PATH,
        });

        Ok(name)
    }

    /// Best-effort image removal. Failure is surfaced through the obs
    /// sink and never changes the primary outcome.
    pub(crate) fn cleanup_image(&self, name: &ImageName) {
        match self.images.delete(name) {
            Ok(()) => record(MetricsEvent::ImageDeleted {
                entity_path: Item::PATH,
            }),
            Err(_) => record(MetricsEvent::ImageCleanupFailed {
                entity_path: Item::PATH,
            }),
        }
    }

    /// Remove a file staged for a submission that did not commit.
    pub(crate) fn discard_staged(&self, staged: Option<&ImageName>) {
        if let Some(name) = staged {
            self.cleanup_image(name);
        }
    }
}

// ------------------------------------------------------------------
// Shared helpers
// ------------------------------------------------------------------

/// Parse a route id; failure reads as "no such record" (terminal).
pub(crate) fn parse_key<E>(raw: &str) -> Result<Ulid, Error>
where
    E: EntityIdentity,
{
    Ulid::from_string(raw).map_err(|_| {
        Error::new(
            ErrorKind::NotFound,
            ErrorOrigin::Executor,
            format!("no {} with id '{raw}'", E::ENTITY_NAME),
        )
    })
}

/// Parse a route id on a delete path, where an unknown target is a
/// soft success rather than an error.
pub(crate) fn parse_key_lenient(raw: &str) -> Option<Ulid> {
    Ulid::from_string(raw).ok()
}

/// Fold one set of field issues into another.
pub(crate) fn merge_issues(dst: &mut Issues, src: Issues) {
    for (field, mut messages) in src {
        dst.entry(field).or_default().append(&mut messages);
    }
}

///
/// TESTS
///
