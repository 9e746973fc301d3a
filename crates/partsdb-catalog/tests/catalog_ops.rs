//! End-to-end orchestrator tests: every write path drives staging,
//! validation, the admin gate, existence checks, and the store, and
//! every read path joins its fan-out.

use partsdb_catalog::{
    AdminPassword, Catalog, CatalogConfig, CategoryForm, DirImageStore, ImageStore, ImageUpload,
    ItemForm, Outcome, Page, db,
};

const SECRET: &str = "hunter2";

fn catalog() -> (tempfile::TempDir, Catalog<DirImageStore>) {
    let dir = tempfile::tempdir().unwrap();
    let images = DirImageStore::new(dir.path()).unwrap();
    let config = CatalogConfig::new(AdminPassword::new(SECRET));

    (dir, Catalog::new(db(), images, config))
}

fn category_form(name: &str) -> CategoryForm {
    CategoryForm {
        name: name.to_string(),
        description: format!("All the {name} parts we keep in stock."),
    }
}

fn redirect_path(outcome: &Outcome) -> &str {
    match outcome {
        Outcome::Redirect { path } => path,
        Outcome::Render(page) => panic!("expected redirect, got render of {}", page.view()),
    }
}

fn rendered_page(outcome: Outcome) -> Page {
    match outcome {
        Outcome::Render(page) => page,
        Outcome::Redirect { path } => panic!("expected render, got redirect to {path}"),
    }
}

fn id_from_path(path: &str) -> String {
    path.rsplit('/').next().unwrap().to_string()
}

fn create_category(catalog: &Catalog<DirImageStore>, name: &str) -> String {
    let outcome = catalog.category_create(category_form(name)).unwrap();
    id_from_path(redirect_path(&outcome))
}

fn item_form(category_id: &str) -> ItemForm {
    ItemForm {
        name: "CPU Fan".to_string(),
        description: "A quiet 120mm cooling fan.".to_string(),
        category: category_id.to_string(),
        price: "19.99".to_string(),
        stock: "5".to_string(),
    }
}

fn upload(name: &str) -> ImageUpload {
    ImageUpload::new(name, vec![0xAB; 64])
}

fn create_item(catalog: &Catalog<DirImageStore>, category_id: &str) -> String {
    let outcome = catalog
        .item_create(item_form(category_id), Some(upload("fan.webp")))
        .unwrap();
    id_from_path(redirect_path(&outcome))
}

// ---------------------
// Categories
// ---------------------

#[test]
fn category_create_then_fetch_returns_sanitized_record() {
    let (_dir, catalog) = catalog();

    let form = CategoryForm {
        name: "  Fans & Coolers  ".to_string(),
        description: "Everything <em>cooling</em> related.".to_string(),
    };
    let outcome = catalog.category_create(form).unwrap();
    let id = id_from_path(redirect_path(&outcome));

    let page = rendered_page(catalog.category_detail(&id).unwrap());
    let Page::CategoryDetail { category, items } = page else {
        panic!("expected a category detail page");
    };

    // trimmed, validated pre-escape, then escaped
    assert_eq!(category.name, "Fans &amp; Coolers");
    assert_eq!(
        category.description,
        "Everything &lt;em&gt;cooling&lt;/em&gt; related."
    );
    assert!(items.is_empty());
}

#[test]
fn category_create_rejection_reports_every_field() {
    let (_dir, catalog) = catalog();

    let form = CategoryForm {
        name: "ab".to_string(),
        description: "short".to_string(),
    };
    let page = rendered_page(catalog.category_create(form.clone()).unwrap());
    let Page::CategoryForm {
        form: echoed,
        errors,
        editing,
    } = page
    else {
        panic!("expected the category form back");
    };

    assert_eq!(echoed, form, "raw input must be echoed unchanged");
    assert!(errors.contains_key("name"));
    assert!(errors.contains_key("description"));
    assert!(editing.is_none());

    let Page::CategoryList { categories } = rendered_page(catalog.category_list().unwrap()) else {
        panic!("expected the category list");
    };
    assert!(categories.is_empty(), "no record may be created");
}

#[test]
fn category_detail_for_unknown_id_is_not_found() {
    let (_dir, catalog) = catalog();

    let err = catalog
        .category_detail("01ARZ3NDEKTSV4RRFFQ69G5FAV")
        .unwrap_err();
    assert!(err.is_not_found());

    let err = catalog.category_detail("mangled").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn category_update_with_wrong_password_leaves_store_unchanged() {
    let (_dir, catalog) = catalog();
    let id = create_category(&catalog, "Memory");

    let outcome = catalog
        .category_update(&id, category_form("Storage"), Some("wrong"))
        .unwrap();

    let Page::CategoryForm { errors, .. } = rendered_page(outcome) else {
        panic!("expected the category form back");
    };
    assert!(errors.contains_key("admin_password"));

    let Page::CategoryDetail { category, .. } =
        rendered_page(catalog.category_detail(&id).unwrap())
    else {
        panic!("expected a category detail page");
    };
    assert_eq!(category.name, "Memory");
}

#[test]
fn category_update_preserves_identity() {
    let (_dir, catalog) = catalog();
    let id = create_category(&catalog, "Memory");

    let outcome = catalog
        .category_update(&id, category_form("Storage"), Some(SECRET))
        .unwrap();
    assert_eq!(id_from_path(redirect_path(&outcome)), id);

    let Page::CategoryDetail { category, .. } =
        rendered_page(catalog.category_detail(&id).unwrap())
    else {
        panic!("expected a category detail page");
    };
    assert_eq!(category.name, "Storage");
}

#[test]
fn category_update_of_missing_record_is_terminal_not_found() {
    let (_dir, catalog) = catalog();
    let id = create_category(&catalog, "Memory");
    catalog.category_delete(&id, Some(SECRET)).unwrap();

    let err = catalog
        .category_update(&id, category_form("Storage"), Some(SECRET))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn unreferenced_category_delete_commits() {
    let (_dir, catalog) = catalog();
    let id = create_category(&catalog, "Cases");

    let outcome = catalog.category_delete(&id, Some(SECRET)).unwrap();
    assert_eq!(redirect_path(&outcome), "/categories");

    assert!(catalog.category_detail(&id).unwrap_err().is_not_found());
}

#[test]
fn referenced_category_delete_is_blocked() {
    let (_dir, catalog) = catalog();
    let category_id = create_category(&catalog, "Coolers");
    create_item(&catalog, &category_id);

    let outcome = catalog.category_delete(&category_id, Some(SECRET)).unwrap();
    let Page::CategoryDeleteConfirm {
        item_count, errors, ..
    } = rendered_page(outcome)
    else {
        panic!("expected the delete confirmation back");
    };

    assert_eq!(item_count, 1);
    assert!(errors.contains_key("category"));

    // still retrievable
    assert!(catalog.category_detail(&category_id).is_ok());
}

#[test]
fn category_delete_after_items_removed_succeeds() {
    let (_dir, catalog) = catalog();
    let category_id = create_category(&catalog, "Coolers");
    let item_id = create_item(&catalog, &category_id);

    catalog.item_delete(&item_id, Some(SECRET)).unwrap();

    let outcome = catalog.category_delete(&category_id, Some(SECRET)).unwrap();
    assert_eq!(redirect_path(&outcome), "/categories");
}

#[test]
fn category_delete_of_missing_record_is_soft_success() {
    let (_dir, catalog) = catalog();
    let id = create_category(&catalog, "Cases");

    catalog.category_delete(&id, Some(SECRET)).unwrap();
    let outcome = catalog.category_delete(&id, Some(SECRET)).unwrap();

    assert_eq!(redirect_path(&outcome), "/categories");
}

#[test]
fn category_delete_with_wrong_password_re_renders_confirmation() {
    let (_dir, catalog) = catalog();
    let id = create_category(&catalog, "Cases");

    let outcome = catalog.category_delete(&id, Some("wrong")).unwrap();
    let Page::CategoryDeleteConfirm { errors, .. } = rendered_page(outcome) else {
        panic!("expected the delete confirmation back");
    };

    assert!(errors.contains_key("admin_password"));
    assert!(catalog.category_detail(&id).is_ok());
}

// ---------------------
// Items
// ---------------------

#[test]
fn item_create_without_image_is_rejected_with_no_side_effects() {
    let (dir, catalog) = catalog();
    let category_id = create_category(&catalog, "Coolers");

    let outcome = catalog
        .item_create(item_form(&category_id), None)
        .unwrap();

    let Page::ItemForm { errors, .. } = rendered_page(outcome) else {
        panic!("expected the item form back");
    };
    assert!(errors.contains_key("image"));

    let Page::ItemList { items } = rendered_page(catalog.item_list().unwrap()) else {
        panic!("expected the item list");
    };
    assert!(items.is_empty(), "no record may be created");

    let staged: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert!(staged.is_empty(), "no staged file may remain");
}

#[test]
fn item_create_rejection_deletes_the_staged_file() {
    let (dir, catalog) = catalog();
    let category_id = create_category(&catalog, "Coolers");

    let mut form = item_form(&category_id);
    form.price = "not-a-price".to_string();

    let outcome = catalog
        .item_create(form, Some(upload("fan.webp")))
        .unwrap();

    let Page::ItemForm { errors, .. } = rendered_page(outcome) else {
        panic!("expected the item form back");
    };
    assert!(errors.contains_key("price"));

    let staged: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert!(staged.is_empty(), "rejected staging must be cleaned up");
}

#[test]
fn item_create_commits_record_and_file() {
    let (_dir, catalog) = catalog();
    let category_id = create_category(&catalog, "Coolers");
    let item_id = create_item(&catalog, &category_id);

    let Page::ItemDetail { item, category } =
        rendered_page(catalog.item_detail(&item_id).unwrap())
    else {
        panic!("expected an item detail page");
    };

    assert_eq!(item.name, "CPU Fan");
    assert_eq!(category.name, "Coolers");

    let image = item.image.expect("item must carry its image");
    assert!(catalog.images().exists(&image));
    assert!(image.as_str().ends_with(".webp"));
}

#[test]
fn item_price_and_stock_violations_name_their_fields() {
    let (_dir, catalog) = catalog();
    let category_id = create_category(&catalog, "Coolers");

    let mut form = item_form(&category_id);
    form.price = "1000000".to_string();
    form.stock = "2.5".to_string();

    let outcome = catalog
        .item_create(form, Some(upload("fan.webp")))
        .unwrap();
    let Page::ItemForm { errors, .. } = rendered_page(outcome) else {
        panic!("expected the item form back");
    };

    assert!(errors.contains_key("price"));
    assert!(errors.contains_key("stock"));
}

#[test]
fn item_update_with_new_image_replaces_the_old_file_after_commit() {
    let (_dir, catalog) = catalog();
    let category_id = create_category(&catalog, "Coolers");
    let item_id = create_item(&catalog, &category_id);

    let Page::ItemDetail { item, .. } = rendered_page(catalog.item_detail(&item_id).unwrap())
    else {
        panic!("expected an item detail page");
    };
    let old_image = item.image.expect("item must carry its image");

    let mut form = item_form(&category_id);
    form.name = "CPU Fan Mk II".to_string();
    let outcome = catalog
        .item_update(&item_id, form, Some(upload("fan-v2.png")), Some(SECRET))
        .unwrap();
    assert_eq!(id_from_path(redirect_path(&outcome)), item_id);

    let Page::ItemDetail { item, .. } = rendered_page(catalog.item_detail(&item_id).unwrap())
    else {
        panic!("expected an item detail page");
    };
    let new_image = item.image.expect("item must carry its image");

    assert_ne!(new_image, old_image);
    assert!(new_image.as_str().ends_with(".png"));
    assert!(catalog.images().exists(&new_image));
    assert!(!catalog.images().exists(&old_image));
}

#[test]
fn item_update_without_upload_keeps_the_prior_image() {
    let (_dir, catalog) = catalog();
    let category_id = create_category(&catalog, "Coolers");
    let item_id = create_item(&catalog, &category_id);

    let Page::ItemDetail { item, .. } = rendered_page(catalog.item_detail(&item_id).unwrap())
    else {
        panic!("expected an item detail page");
    };
    let old_image = item.image.expect("item must carry its image");

    let mut form = item_form(&category_id);
    form.stock = "4".to_string();
    catalog
        .item_update(&item_id, form, None, Some(SECRET))
        .unwrap();

    let Page::ItemDetail { item, .. } = rendered_page(catalog.item_detail(&item_id).unwrap())
    else {
        panic!("expected an item detail page");
    };

    assert_eq!(item.stock, 4);
    assert_eq!(item.image, Some(old_image.clone()));
    assert!(catalog.images().exists(&old_image));
}

#[test]
fn item_update_rejection_discards_the_new_staging() {
    let (_dir, catalog) = catalog();
    let category_id = create_category(&catalog, "Coolers");
    let item_id = create_item(&catalog, &category_id);

    let mut form = item_form(&category_id);
    form.stock = "lots".to_string();
    let outcome = catalog
        .item_update(&item_id, form, Some(upload("fan-v2.png")), Some(SECRET))
        .unwrap();

    let Page::ItemForm { errors, .. } = rendered_page(outcome) else {
        panic!("expected the item form back");
    };
    assert!(errors.contains_key("stock"));

    let Page::ItemDetail { item, .. } = rendered_page(catalog.item_detail(&item_id).unwrap())
    else {
        panic!("expected an item detail page");
    };
    let image = item.image.expect("item must carry its image");

    assert!(image.as_str().ends_with(".webp"), "prior image must remain");
    assert!(catalog.images().exists(&image));
}

#[test]
fn item_update_with_wrong_password_is_rejected() {
    let (_dir, catalog) = catalog();
    let category_id = create_category(&catalog, "Coolers");
    let item_id = create_item(&catalog, &category_id);

    let outcome = catalog
        .item_update(&item_id, item_form(&category_id), None, Some("wrong"))
        .unwrap();

    let Page::ItemForm { errors, .. } = rendered_page(outcome) else {
        panic!("expected the item form back");
    };
    assert!(errors.contains_key("admin_password"));
}

#[test]
fn item_delete_removes_record_and_image() {
    let (_dir, catalog) = catalog();
    let category_id = create_category(&catalog, "Coolers");
    let item_id = create_item(&catalog, &category_id);

    let Page::ItemDetail { item, .. } = rendered_page(catalog.item_detail(&item_id).unwrap())
    else {
        panic!("expected an item detail page");
    };
    let image = item.image.expect("item must carry its image");

    let outcome = catalog.item_delete(&item_id, Some(SECRET)).unwrap();
    assert_eq!(redirect_path(&outcome), "/items");

    assert!(catalog.item_detail(&item_id).unwrap_err().is_not_found());
    assert!(!catalog.images().exists(&image));

    // a second delete attempt is a soft no-op
    let outcome = catalog.item_delete(&item_id, Some(SECRET)).unwrap();
    assert_eq!(redirect_path(&outcome), "/items");
}

#[test]
fn item_delete_with_wrong_password_re_renders_confirmation() {
    let (_dir, catalog) = catalog();
    let category_id = create_category(&catalog, "Coolers");
    let item_id = create_item(&catalog, &category_id);

    let outcome = catalog.item_delete(&item_id, Some("wrong")).unwrap();
    let Page::ItemDeleteConfirm { errors, .. } = rendered_page(outcome) else {
        panic!("expected the delete confirmation back");
    };

    assert!(errors.contains_key("admin_password"));
    assert!(catalog.item_detail(&item_id).is_ok());
}

#[test]
fn item_form_offers_all_categories() {
    let (_dir, catalog) = catalog();
    create_category(&catalog, "Coolers");
    create_category(&catalog, "Memory");

    let Page::ItemForm { categories, .. } = rendered_page(catalog.item_create_form().unwrap())
    else {
        panic!("expected the item form");
    };

    assert_eq!(categories.len(), 2);
}

#[test]
fn page_contexts_serialize_for_the_renderer() {
    let (_dir, catalog) = catalog();
    let category_id = create_category(&catalog, "Coolers");
    create_item(&catalog, &category_id);

    let page = rendered_page(catalog.category_detail(&category_id).unwrap());
    assert_eq!(page.view(), "categories/detail");

    let context = serde_json::to_value(&page).unwrap();
    let detail = &context["CategoryDetail"];

    assert_eq!(detail["category"]["name"], "Coolers");
    assert_eq!(detail["items"][0]["name"], "CPU Fan");
    assert_eq!(detail["items"][0]["stock"], 5);
}

#[test]
fn category_detail_projects_item_summaries() {
    let (_dir, catalog) = catalog();
    let category_id = create_category(&catalog, "Coolers");
    create_item(&catalog, &category_id);

    let Page::CategoryDetail { items, .. } =
        rendered_page(catalog.category_detail(&category_id).unwrap())
    else {
        panic!("expected a category detail page");
    };

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "CPU Fan");
    assert_eq!(items[0].stock, 5);
    assert_eq!(items[0].price, "19.99".parse().unwrap());
}
