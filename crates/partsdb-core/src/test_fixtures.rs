//! Entity fixtures for core tests.

use crate::{
    db::{
        Db,
        relation::{RelationDef, RelationSource},
        store::{DataStore, DataStoreRegistry},
    },
    traits::{
        DomainKind, EntityIdentity, EntityKey, EntityKind, EntityValue, Path, RawKey,
        SanitizeAuto, SanitizeCustom, StorageKey, ValidateAuto, ValidateCustom, Visitable,
    },
    types::Ulid,
    visitor::{FieldContext, VisitorContext, VisitorCore, VisitorMutCore, perform_visit,
        perform_visit_mut},
};
use serde::{Deserialize, Serialize};

///
/// TestDomain
///

pub(crate) struct TestDomain;

impl Path for TestDomain {
    const PATH: &'static str = "test";
}

impl DomainKind for TestDomain {}

thread_local! {
    static TEST_DATA: DataStoreRegistry = {
        let mut reg = DataStoreRegistry::new();
        reg.register(Widget::PATH, DataStore::new());
        reg.register(Gadget::PATH, DataStore::new());
        reg
    };
}

pub(crate) fn db() -> Db<TestDomain> {
    Db::new(&TEST_DATA)
}

///
/// Widget
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct Widget {
    pub id: Ulid,
    pub name: String,
}

impl Path for Widget {
    const PATH: &'static str = "test::Widget";
}

impl EntityKey for Widget {
    type Key = Ulid;
}

impl EntityIdentity for Widget {
    const ENTITY_NAME: &'static str = "Widget";
    const PRIMARY_KEY: &'static str = "id";
}

impl EntityValue for Widget {
    fn key(&self) -> Self::Key {
        self.id
    }
}

impl EntityKind for Widget {
    type Domain = TestDomain;
}

impl Visitable for Widget {
    fn drive(&self, visitor: &mut dyn VisitorCore) {
        perform_visit(visitor, &self.id, "id");
        perform_visit(visitor, &self.name, "name");
    }

    fn drive_mut(&mut self, visitor: &mut dyn VisitorMutCore) {
        perform_visit_mut(visitor, &mut self.id, "id");
        perform_visit_mut(visitor, &mut self.name, "name");
    }
}

impl SanitizeAuto for Widget {
    fn sanitize_self(&mut self, _ctx: &mut dyn VisitorContext) {
        let trimmed = self.name.trim();
        if trimmed.len() != self.name.len() {
            self.name = trimmed.to_owned();
        }
    }
}

impl SanitizeCustom for Widget {}

impl ValidateAuto for Widget {
    fn validate_self(&self, ctx: &mut dyn VisitorContext) {
        let mut name = FieldContext::new(ctx, "name");
        if self.name.is_empty() {
            name.add_issue("name must not be empty".to_string());
        }
    }
}

impl ValidateCustom for Widget {}

///
/// Gadget
/// Strongly references a Widget; used by relation restrict tests.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct Gadget {
    pub id: Ulid,
    pub widget: Ulid,
    pub label: String,
}

impl Path for Gadget {
    const PATH: &'static str = "test::Gadget";
}

impl EntityKey for Gadget {
    type Key = Ulid;
}

impl EntityIdentity for Gadget {
    const ENTITY_NAME: &'static str = "Gadget";
    const PRIMARY_KEY: &'static str = "id";
}

impl EntityValue for Gadget {
    fn key(&self) -> Self::Key {
        self.id
    }
}

impl EntityKind for Gadget {
    type Domain = TestDomain;
}

impl Visitable for Gadget {
    fn drive(&self, visitor: &mut dyn VisitorCore) {
        perform_visit(visitor, &self.id, "id");
        perform_visit(visitor, &self.widget, "widget");
        perform_visit(visitor, &self.label, "label");
    }

    fn drive_mut(&mut self, visitor: &mut dyn VisitorMutCore) {
        perform_visit_mut(visitor, &mut self.id, "id");
        perform_visit_mut(visitor, &mut self.widget, "widget");
        perform_visit_mut(visitor, &mut self.label, "label");
    }
}

impl SanitizeAuto for Gadget {}
impl SanitizeCustom for Gadget {}
impl ValidateAuto for Gadget {}
impl ValidateCustom for Gadget {}

impl RelationSource for Gadget {
    const STRONG_RELATIONS: &'static [RelationDef] = &[RelationDef {
        field: "widget",
        target_path: Widget::PATH,
    }];

    fn relation_key(&self, field: &'static str) -> Option<RawKey> {
        match field {
            "widget" => Some(self.widget.to_raw()),
            _ => None,
        }
    }
}
