use crate::{category::Category, domain::CatalogDomain, image::ImageName};
use partsdb::{
    base::{
        sanitizer::{text::Trim, web::escape_markup},
        validator::{len, num, text::NotEmpty},
    },
    core::traits::RawKey,
    prelude::*,
};

///
/// Item
///
/// One stocked part. Holds exactly one category reference and owns its
/// image file exclusively.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Item {
    pub id: Ulid,
    pub name: String,
    pub description: String,
    pub category: Ulid,
    pub price: Decimal,
    pub stock: u32,
    pub image: Option<ImageName>,
}

impl Item {
    pub const URL_ROOT: &'static str = "/items";

    /// Derived canonical location; never stored.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}/{}", Self::URL_ROOT, self.id)
    }
}

impl Path for Item {
    const PATH: &'static str = "catalog::Item";
}

impl EntityKey for Item {
    type Key = Ulid;
}

impl EntityIdentity for Item {
    const ENTITY_NAME: &'static str = "Item";
    const PRIMARY_KEY: &'static str = "id";
}

impl EntityValue for Item {
    fn key(&self) -> Self::Key {
        self.id
    }
}

impl EntityKind for Item {
    type Domain = CatalogDomain;
}

impl RelationSource for Item {
    const STRONG_RELATIONS: &'static [RelationDef] = &[RelationDef {
        field: "category",
        target_path: Category::PATH,
    }];

    fn relation_key(&self, field: &'static str) -> Option<RawKey> {
        match field {
            "category" => Some(self.category.to_raw()),
            _ => None,
        }
    }
}

impl Visitable for Item {
    fn drive(&self, visitor: &mut dyn VisitorCore) {
        perform_visit(visitor, &self.id, "id");
        perform_visit(visitor, &self.name, "name");
        perform_visit(visitor, &self.description, "description");
        perform_visit(visitor, &self.category, "category");
        perform_visit(visitor, &self.price, "price");
        perform_visit(visitor, &self.stock, "stock");
        perform_visit(visitor, &self.image, "image");
    }

    fn drive_mut(&mut self, visitor: &mut dyn VisitorMutCore) {
        perform_visit_mut(visitor, &mut self.id, "id");
        perform_visit_mut(visitor, &mut self.name, "name");
        perform_visit_mut(visitor, &mut self.description, "description");
        perform_visit_mut(visitor, &mut self.category, "category");
        perform_visit_mut(visitor, &mut self.price, "price");
        perform_visit_mut(visitor, &mut self.stock, "stock");
        perform_visit_mut(visitor, &mut self.image, "image");
    }
}

impl SanitizeAuto for Item {
    fn sanitize_self(&mut self, ctx: &mut dyn VisitorContext) {
        for (field, value) in [
            ("name", &mut self.name),
            ("description", &mut self.description),
        ] {
            if let Err(message) = Trim.sanitize(value) {
                FieldContext::new(ctx, field).add_issue(message);
            }
        }
    }
}

impl SanitizeCustom for Item {}

// Storage-level integrity only. The user-facing windows live on the form,
// where they are checked on the pre-escape text.
impl ValidateAuto for Item {
    fn validate_self(&self, ctx: &mut dyn VisitorContext) {
        NotEmpty.validate(&self.name, &mut FieldContext::new(ctx, "name"));
        NotEmpty.validate(&self.description, &mut FieldContext::new(ctx, "description"));

        if self.category.is_nil() {
            FieldContext::new(ctx, "category")
                .add_issue("must reference a category".to_string());
        }

        num::Range::new(0, 999_999).validate(&self.price, &mut FieldContext::new(ctx, "price"));
        num::Range::new(0, 999_999).validate(&self.stock, &mut FieldContext::new(ctx, "stock"));
    }
}

impl ValidateCustom for Item {}

///
/// ItemForm
///
/// Raw create/update submission: every field arrives as text. Values
/// stay untouched so a rejected form can be re-displayed exactly as
/// the user typed it. The image upload travels beside the form, not
/// in it.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ItemForm {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub stock: String,
}

impl ItemForm {
    /// Prefill from a stored item for the update form.
    #[must_use]
    pub fn prefill(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            category: item.category.to_string(),
            price: item.price.to_string(),
            stock: item.stock.to_string(),
        }
    }

    /// Run the pipeline: trim, validate the pre-escape text, then escape
    /// and convert to typed values.
    ///
    /// All rule violations are collected and returned together.
    pub fn into_draft(&self) -> Result<ItemDraft, Issues> {
        let mut form = self.clone();

        if let Err(err) = sanitize(&mut form) {
            let partsdb::core::visitor::SanitizeError::SanitizeFailed(issues) = err;
            return Err(issues);
        }

        if let Err(err) = validate(&form) {
            return Err(err.into_issues());
        }

        let category = Ulid::from_string(&form.category)
            .map_err(|_| single_issue("category", "is not a valid category reference"))?;
        let price: Decimal = form
            .price
            .parse()
            .map_err(|_| single_issue("price", "must be a number"))?;
        let stock: u32 = form
            .stock
            .parse()
            .map_err(|_| single_issue("stock", "must be a whole number"))?;

        Ok(ItemDraft {
            name: escape_markup(&form.name),
            description: escape_markup(&form.description),
            category,
            price,
            stock,
        })
    }
}

fn single_issue(field: &str, message: &str) -> Issues {
    let mut issues = Issues::new();
    issues
        .entry(field.to_string())
        .or_default()
        .push(message.to_string());

    issues
}

impl Visitable for ItemForm {
    fn drive(&self, visitor: &mut dyn VisitorCore) {
        perform_visit(visitor, &self.name, "name");
        perform_visit(visitor, &self.description, "description");
        perform_visit(visitor, &self.category, "category");
        perform_visit(visitor, &self.price, "price");
        perform_visit(visitor, &self.stock, "stock");
    }

    fn drive_mut(&mut self, visitor: &mut dyn VisitorMutCore) {
        perform_visit_mut(visitor, &mut self.name, "name");
        perform_visit_mut(visitor, &mut self.description, "description");
        perform_visit_mut(visitor, &mut self.category, "category");
        perform_visit_mut(visitor, &mut self.price, "price");
        perform_visit_mut(visitor, &mut self.stock, "stock");
    }
}

impl SanitizeAuto for ItemForm {
    fn sanitize_self(&mut self, ctx: &mut dyn VisitorContext) {
        for (field, value) in [
            ("name", &mut self.name),
            ("description", &mut self.description),
            ("category", &mut self.category),
            ("price", &mut self.price),
            ("stock", &mut self.stock),
        ] {
            if let Err(message) = Trim.sanitize(value) {
                FieldContext::new(ctx, field).add_issue(message);
            }
        }
    }
}

impl SanitizeCustom for ItemForm {}

impl ValidateAuto for ItemForm {
    fn validate_self(&self, ctx: &mut dyn VisitorContext) {
        len::Range::new(1, 100).validate(&self.name, &mut FieldContext::new(ctx, "name"));
        len::Range::new(10, 500).validate(
            &self.description,
            &mut FieldContext::new(ctx, "description"),
        );

        let mut category = FieldContext::new(ctx, "category");
        NotEmpty.validate(&self.category, &mut category);
        if !self.category.is_empty() {
            match Ulid::from_string(&self.category) {
                Ok(id) if !id.is_nil() => {}
                _ => category.add_issue("is not a valid category reference".to_string()),
            }
        }

        let mut price = FieldContext::new(ctx, "price");
        match self.price.parse::<Decimal>() {
            Ok(value) => num::Range::new(0, 999_999).validate(&value, &mut price),
            Err(_) => price.add_issue("must be a number".to_string()),
        }

        let mut stock = FieldContext::new(ctx, "stock");
        match self.stock.parse::<i64>() {
            Ok(value) => num::Range::new(0, 999_999).validate(&value, &mut stock),
            Err(_) => stock.add_issue("must be a whole number".to_string()),
        }
    }
}

impl ValidateCustom for ItemForm {}

///
/// ItemDraft
///
/// The sanitized, typed record produced by a valid form submission.
/// The image is decided by the orchestrator (staged upload or the
/// prior file), not by the form.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    pub category: Ulid,
    pub price: Decimal,
    pub stock: u32,
}

impl ItemDraft {
    /// Materialize as a brand-new item.
    #[must_use]
    pub fn create(self, image: Option<ImageName>) -> Item {
        Item {
            id: Ulid::generate(),
            name: self.name,
            description: self.description,
            category: self.category,
            price: self.price,
            stock: self.stock,
            image,
        }
    }

    /// Materialize over an existing item, preserving identity and
    /// falling back to the prior image when nothing new was staged.
    #[must_use]
    pub fn apply_to(self, existing: Item, staged: Option<ImageName>) -> Item {
        Item {
            id: existing.id,
            name: self.name,
            description: self.description,
            category: self.category,
            price: self.price,
            stock: self.stock,
            image: staged.or(existing.image),
        }
    }
}

///
/// TESTS
///
