use crate::{
    category::Category,
    image::{ImageStore, ImageUpload},
    item::{Item, ItemForm},
    ops::{Catalog, Outcome, Page, merge_issues, parse_key, parse_key_lenient},
};
use partsdb::{Error, prelude::*};

impl<I: ImageStore> Catalog<I> {
    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn item_list(&self) -> Result<Outcome, Error> {
        let items = self.session().load::<Item>().all()?.into_entities();

        Ok(Outcome::Render(Page::ItemList { items }))
    }

    /// Item plus its category: two independent reads joined into one
    /// context. Either failure fails the whole operation.
    pub fn item_detail(&self, id: &str) -> Result<Outcome, Error> {
        let key = parse_key::<Item>(id)?;

        let item = self.session().load::<Item>().require(key)?;
        let category = self.session().load::<Category>().require(item.category)?;

        Ok(Outcome::Render(Page::ItemDetail { item, category }))
    }

    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    pub fn item_create_form(&self) -> Result<Outcome, Error> {
        self.item_form_page(ItemForm::default(), Issues::new(), None)
    }

    /// Create(Item): stage the upload first, then validate, then commit.
    /// A rejected submission deletes the staged file before re-rendering.
    pub fn item_create(
        &self,
        form: ItemForm,
        upload: Option<ImageUpload>,
    ) -> Result<Outcome, Error> {
        let staged = match &upload {
            Some(upload) => Some(self.stage_image(upload)?),
            None => None,
        };

        let mut errors = Issues::new();
        let draft = match form.into_draft() {
            Ok(draft) => Some(draft),
            Err(form_errors) => {
                merge_issues(&mut errors, form_errors);
                None
            }
        };

        if self.require_item_image() && staged.is_none() {
            errors
                .entry("image".to_string())
                .or_default()
                .push("an image is required".to_string());
        }

        let Some(draft) = draft.filter(|_| errors.is_empty()) else {
            self.discard_staged(staged.as_ref());
            return self.item_form_page(form, errors, None);
        };

        match self.session().insert(draft.create(staged.clone())) {
            Ok(item) => Ok(Outcome::redirect(item.url())),
            Err(err) => {
                // Never leave a staged file referenced by no record.
                self.discard_staged(staged.as_ref());
                Err(err.into())
            }
        }
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    pub fn item_update_form(&self, id: &str) -> Result<Outcome, Error> {
        let key = parse_key::<Item>(id)?;
        let item = self.session().load::<Item>().require(key)?;

        self.item_form_page(ItemForm::prefill(&item), Issues::new(), Some(item.id()))
    }

    /// Update(Item): optional staging, validation with the admin gate,
    /// then an in-place update; the prior image file is deleted only
    /// after the new record committed.
    pub fn item_update(
        &self,
        id: &str,
        form: ItemForm,
        upload: Option<ImageUpload>,
        admin_password: Option<&str>,
    ) -> Result<Outcome, Error> {
        let key = parse_key::<Item>(id)?;

        let staged = match &upload {
            Some(upload) => Some(self.stage_image(upload)?),
            None => None,
        };

        let mut errors = Issues::new();
        self.check_admin(admin_password, &mut errors, Item::PATH);

        let draft = match form.into_draft() {
            Ok(draft) => Some(draft),
            Err(form_errors) => {
                merge_issues(&mut errors, form_errors);
                None
            }
        };

        let Some(draft) = draft.filter(|_| errors.is_empty()) else {
            self.discard_staged(staged.as_ref());
            return self.item_form_page(form, errors, Some(Id::from_key(key)));
        };

        let existing = match self.session().load::<Item>().require(key) {
            Ok(existing) => existing,
            Err(err) => {
                self.discard_staged(staged.as_ref());
                return Err(err.into());
            }
        };

        let prior_image = existing.image.clone();
        let updated = match self.session().update(draft.apply_to(existing, staged.clone())) {
            Ok(updated) => updated,
            Err(err) => {
                self.discard_staged(staged.as_ref());
                return Err(err.into());
            }
        };

        // The old file is removed only after the commit succeeded, so a
        // record never points at a missing file.
        if staged.is_some()
            && let Some(old) = prior_image
            && Some(&old) != updated.image.as_ref()
        {
            self.cleanup_image(&old);
        }

        Ok(Outcome::redirect(updated.url()))
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    pub fn item_delete_form(&self, id: &str) -> Result<Outcome, Error> {
        let Some(key) = parse_key_lenient(id) else {
            return Ok(Outcome::redirect(Item::URL_ROOT));
        };

        let Some(item) = self.session().load::<Item>().one(key)?.maybe_one()? else {
            return Ok(Outcome::redirect(Item::URL_ROOT));
        };

        Ok(Outcome::Render(Page::ItemDeleteConfirm {
            item,
            errors: Issues::new(),
        }))
    }

    /// Delete(Item): the record goes first; the image file removal is a
    /// best-effort side effect that never undoes the record deletion.
    pub fn item_delete(&self, id: &str, admin_password: Option<&str>) -> Result<Outcome, Error> {
        let Some(key) = parse_key_lenient(id) else {
            return Ok(Outcome::redirect(Item::URL_ROOT));
        };

        let Some(item) = self.session().load::<Item>().one(key)?.maybe_one()? else {
            return Ok(Outcome::redirect(Item::URL_ROOT));
        };

        let mut errors = Issues::new();
        self.check_admin(admin_password, &mut errors, Item::PATH);

        if !errors.is_empty() {
            return Ok(Outcome::Render(Page::ItemDeleteConfirm { item, errors }));
        }

        let removed = self.session().delete::<Item>().one(key)?;

        for entity in removed.into_entities() {
            if let Some(image) = entity.image {
                self.cleanup_image(&image);
            }
        }

        Ok(Outcome::redirect(Item::URL_ROOT))
    }

    // ------------------------------------------------------------------
    // Shared context assembly
    // ------------------------------------------------------------------

    fn item_form_page(
        &self,
        form: ItemForm,
        errors: Issues,
        editing: Option<Id<Item>>,
    ) -> Result<Outcome, Error> {
        let categories = self.session().load::<Category>().all()?.into_entities();

        Ok(Outcome::Render(Page::ItemForm {
            form,
            categories,
            errors,
            editing,
        }))
    }
}
