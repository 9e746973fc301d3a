use crate::{
    category::{Category, CategoryForm},
    image::ImageStore,
    item::Item,
    ops::{Catalog, ItemSummary, Outcome, Page, merge_issues, parse_key, parse_key_lenient},
};
use partsdb::{Error, core::db::relation::validate_delete_one_strong_relation, prelude::*};

impl<I: ImageStore> Catalog<I> {
    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn category_list(&self) -> Result<Outcome, Error> {
        let categories = self.session().load::<Category>().all()?.into_entities();

        Ok(Outcome::Render(Page::CategoryList { categories }))
    }

    /// Category plus its items: two independent reads joined into one
    /// context. Either failure fails the whole operation.
    pub fn category_detail(&self, id: &str) -> Result<Outcome, Error> {
        let key = parse_key::<Category>(id)?;

        let category = self.session().load::<Category>().require(key)?;
        let items = self
            .session()
            .load::<Item>()
            .filter(|item| item.category == key)?;

        Ok(Outcome::Render(Page::CategoryDetail {
            category,
            items: items.entities().map(ItemSummary::from).collect(),
        }))
    }

    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    #[must_use]
    pub fn category_create_form(&self) -> Outcome {
        Outcome::Render(Page::CategoryForm {
            form: CategoryForm::default(),
            errors: Issues::new(),
            editing: None,
        })
    }

    pub fn category_create(&self, form: CategoryForm) -> Result<Outcome, Error> {
        match form.into_draft() {
            Err(errors) => Ok(Outcome::Render(Page::CategoryForm {
                form,
                errors,
                editing: None,
            })),
            Ok(draft) => {
                let category = self.session().insert(draft.create())?;

                Ok(Outcome::redirect(category.url()))
            }
        }
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    pub fn category_update_form(&self, id: &str) -> Result<Outcome, Error> {
        let key = parse_key::<Category>(id)?;
        let category = self.session().load::<Category>().require(key)?;

        Ok(Outcome::Render(Page::CategoryForm {
            form: CategoryForm::prefill(&category),
            editing: Some(category.id()),
            errors: Issues::new(),
        }))
    }

    pub fn category_update(
        &self,
        id: &str,
        form: CategoryForm,
        admin_password: Option<&str>,
    ) -> Result<Outcome, Error> {
        let key = parse_key::<Category>(id)?;

        let mut errors = Issues::new();
        self.check_admin(admin_password, &mut errors, Category::PATH);

        let draft = match form.into_draft() {
            Ok(draft) => Some(draft),
            Err(form_errors) => {
                merge_issues(&mut errors, form_errors);
                None
            }
        };

        let Some(draft) = draft.filter(|_| errors.is_empty()) else {
            return Ok(Outcome::Render(Page::CategoryForm {
                form,
                errors,
                editing: Some(Id::from_key(key)),
            }));
        };

        let existing = self.session().load::<Category>().require(key)?;
        let updated = self.session().update(draft.apply_to(existing))?;

        Ok(Outcome::redirect(updated.url()))
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    pub fn category_delete_form(&self, id: &str) -> Result<Outcome, Error> {
        let Some(key) = parse_key_lenient(id) else {
            return Ok(Outcome::redirect(Category::URL_ROOT));
        };

        let Some(category) = self.session().load::<Category>().one(key)?.maybe_one()? else {
            return Ok(Outcome::redirect(Category::URL_ROOT));
        };

        let item_count = self
            .session()
            .load::<Item>()
            .count(|item| item.category == key)?;

        Ok(Outcome::Render(Page::CategoryDeleteConfirm {
            category,
            item_count,
            errors: Issues::new(),
        }))
    }

    pub fn category_delete(&self, id: &str, admin_password: Option<&str>) -> Result<Outcome, Error> {
        let Some(key) = parse_key_lenient(id) else {
            return Ok(Outcome::redirect(Category::URL_ROOT));
        };

        // Existence first: deleting a missing category is a soft success.
        let Some(category) = self.session().load::<Category>().one(key)?.maybe_one()? else {
            return Ok(Outcome::redirect(Category::URL_ROOT));
        };

        let item_count = self
            .session()
            .load::<Item>()
            .count(|item| item.category == key)?;

        let mut errors = Issues::new();
        self.check_admin(admin_password, &mut errors, Category::PATH);

        if errors.is_empty() {
            match validate_delete_one_strong_relation::<Item>(
                &self.session().db(),
                Category::PATH,
                key.to_raw(),
            ) {
                Ok(()) => {}
                Err(err) if err.is_conflict() => {
                    errors.entry("category".to_string()).or_default().push(format!(
                        "cannot delete: {item_count} item(s) still reference this category"
                    ));
                }
                Err(err) => return Err(err.into()),
            }
        }

        if !errors.is_empty() {
            return Ok(Outcome::Render(Page::CategoryDeleteConfirm {
                category,
                item_count,
                errors,
            }));
        }

        self.session().delete::<Category>().one(key)?;

        Ok(Outcome::redirect(Category::URL_ROOT))
    }
}
