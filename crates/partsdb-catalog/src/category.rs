use crate::domain::CatalogDomain;
use partsdb::{
    base::{
        sanitizer::{text::Trim, web::escape_markup},
        validator::{len, text::NotEmpty},
    },
    prelude::*,
};

///
/// Category
///
/// A part category. Deletable only while no Item references it.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Category {
    pub id: Ulid,
    pub name: String,
    pub description: String,
}

impl Category {
    pub const URL_ROOT: &'static str = "/categories";

    /// Derived canonical location; never stored.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}/{}", Self::URL_ROOT, self.id)
    }
}

impl Path for Category {
    const PATH: &'static str = "catalog::Category";
}

impl EntityKey for Category {
    type Key = Ulid;
}

impl EntityIdentity for Category {
    const ENTITY_NAME: &'static str = "Category";
    const PRIMARY_KEY: &'static str = "id";
}

impl EntityValue for Category {
    fn key(&self) -> Self::Key {
        self.id
    }
}

impl EntityKind for Category {
    type Domain = CatalogDomain;
}

impl Visitable for Category {
    fn drive(&self, visitor: &mut dyn VisitorCore) {
        perform_visit(visitor, &self.id, "id");
        perform_visit(visitor, &self.name, "name");
        perform_visit(visitor, &self.description, "description");
    }

    fn drive_mut(&mut self, visitor: &mut dyn VisitorMutCore) {
        perform_visit_mut(visitor, &mut self.id, "id");
        perform_visit_mut(visitor, &mut self.name, "name");
        perform_visit_mut(visitor, &mut self.description, "description");
    }
}

impl SanitizeAuto for Category {
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

impl SanitizeCustom for Category {}

// Storage-level integrity only. The user-facing length windows are
// checked on the pre-escape form text; escaped text may be longer.
impl ValidateAuto for Category {
    fn validate_self(&self, ctx: &mut dyn VisitorContext) {
        NotEmpty.validate(&self.name, &mut FieldContext::new(ctx, "name"));
        NotEmpty.validate(&self.description, &mut FieldContext::new(ctx, "description"));
    }
}

impl ValidateCustom for Category {}

///
/// CategoryForm
///
/// Raw create/update submission. Field values stay untouched so a
/// rejected form can be re-displayed exactly as the user typed it.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
}

impl CategoryForm {
    /// Prefill from a stored category for the update form.
    #[must_use]
    pub fn prefill(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone(),
        }
    }

    /// Run the pipeline: trim, validate the pre-escape text, then escape.
    ///
    /// All rule violations are collected and returned together.
    pub fn into_draft(&self) -> Result<CategoryDraft, Issues> {
        let mut form = self.clone();

        if let Err(err) = sanitize(&mut form) {
            let partsdb::core::visitor::SanitizeError::SanitizeFailed(issues) = err;
            return Err(issues);
        }

        if let Err(err) = validate(&form) {
            return Err(err.into_issues());
        }

        Ok(CategoryDraft {
            name: escape_markup(&form.name),
            description: escape_markup(&form.description),
        })
    }
}

impl Visitable for CategoryForm {
    fn drive(&self, visitor: &mut dyn VisitorCore) {
        perform_visit(visitor, &self.name, "name");
        perform_visit(visitor, &self.description, "description");
    }

    fn drive_mut(&mut self, visitor: &mut dyn VisitorMutCore) {
        perform_visit_mut(visitor, &mut self.name, "name");
        perform_visit_mut(visitor, &mut self.description, "description");
    }
}

impl SanitizeAuto for CategoryForm {
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

impl SanitizeCustom for CategoryForm {}

impl ValidateAuto for CategoryForm {
    fn validate_self(&self, ctx: &mut dyn VisitorContext) {
        len::Range::new(3, 100).validate(&self.name, &mut FieldContext::new(ctx, "name"));
        len::Range::new(10, 500).validate(
            &self.description,
            &mut FieldContext::new(ctx, "description"),
        );
    }
}

impl ValidateCustom for CategoryForm {}

///
/// CategoryDraft
///
/// The sanitized, escaped record produced by a valid form submission.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
}

impl CategoryDraft {
    /// Materialize as a brand-new category.
    #[must_use]
    pub fn create(self) -> Category {
        Category {
            id: Ulid::generate(),
            name: self.name,
            description: self.description,
        }
    }

    /// Materialize over an existing category, preserving its identity.
    #[must_use]
    pub fn apply_to(self, existing: Category) -> Category {
        Category {
            id: existing.id,
            name: self.name,
            description: self.description,
        }
    }
}

///
/// TESTS
///
