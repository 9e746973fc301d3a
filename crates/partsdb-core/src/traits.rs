use crate::visitor::{VisitorContext, VisitorCore, VisitorMutCore, perform_visit, perform_visit_mut};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::{Debug, Display};
use std::hash::Hash;

// ============================================================================
// FOUNDATIONAL KINDS
// ============================================================================
//
// These traits define *where* something lives in the system,
// not what data it contains.
//

///
/// Path
/// Fully-qualified schema path.
///

pub trait Path {
    const PATH: &'static str;
}

/// Marker for all schema/runtime nodes.
pub trait Kind: Path + 'static {}
impl<T> Kind for T where T: Path + 'static {}

/// Marker for domain namespaces: one registry of stores per domain.
pub trait DomainKind: Kind {}

// ============================================================================
// STORAGE KEYS
// ============================================================================

/// Raw storage representation of a primary key.
pub type RawKey = [u8; 16];

///
/// StorageKey
///
/// Conversion boundary between a typed primary key and its raw
/// storage representation. Keys are plain values; typed identity
/// is provided by `Id<E>`, not by the key itself.
///

pub trait StorageKey:
    Copy + Debug + Display + Eq + Hash + Ord + Send + Sized + 'static
{
    fn to_raw(self) -> RawKey;
    fn from_raw(raw: RawKey) -> Self;
}

// ============================================================================
// ENTITY IDENTITY & SCHEMA
// ============================================================================
//
// These traits describe *what an entity is*, not how it is stored
// or manipulated at runtime.
//

///
/// EntityKey
///
/// Associates an entity with the primitive type used as its primary key.
///

pub trait EntityKey {
    type Key: StorageKey;
}

///
/// EntityIdentity
///
/// Semantic primary-key metadata about an entity.
///

pub trait EntityIdentity: EntityKey {
    const ENTITY_NAME: &'static str;
    const PRIMARY_KEY: &'static str;
}

///
/// EntityValue
///
/// A concrete entity value that can present a typed identity at boundaries.
///
/// Implementors store primitive key material internally.
/// `id()` constructs a typed `Id<Self>` view on demand.
///

pub trait EntityValue: EntityIdentity + Sized {
    fn key(&self) -> Self::Key;

    fn id(&self) -> crate::types::Id<Self> {
        crate::types::Id::from_key(self.key())
    }
}

// ============================================================================
// TYPE SYSTEM CONTRACTS
// ============================================================================

///
/// TypeKind
///
/// Any schema-defined data type.
///
/// This is a *strong* contract and should only be required
/// where full lifecycle semantics are needed.
///

pub trait TypeKind:
    Clone + Debug + DeserializeOwned + PartialEq + Serialize + Visitable + 'static
{
}

impl<T> TypeKind for T where
    T: Clone + Debug + DeserializeOwned + PartialEq + Serialize + Visitable + 'static
{
}

///
/// EntityKind
///
/// Fully runtime-bound entity.
///
/// This is the *maximum* entity contract and should only be
/// required by code that actually touches storage or execution.
///

pub trait EntityKind: Kind + EntityIdentity + EntityValue + TypeKind {
    type Domain: DomainKind;
}

// ============================================================================
// SANITIZATION / VALIDATION
// ============================================================================

///
/// Sanitizer
///
/// Transforms a value into a sanitized version.
///

pub trait Sanitizer<T: ?Sized> {
    fn sanitize(&self, value: &mut T) -> Result<(), String>;
}

///
/// Validator
///
/// Validates a value, reporting issues through the visitor context.
///

pub trait Validator<T: ?Sized> {
    fn validate(&self, value: &T, ctx: &mut dyn VisitorContext);
}

// ============================================================================
// VISITOR CONTRACTS
// ============================================================================

///
/// Visitable
///

pub trait Visitable: Sanitize + Validate {
    fn drive(&self, _: &mut dyn VisitorCore) {}
    fn drive_mut(&mut self, _: &mut dyn VisitorMutCore) {}
}

///
/// Validate
///

pub trait Validate: ValidateAuto + ValidateCustom {}

impl<T> Validate for T where T: ValidateAuto + ValidateCustom {}

///
/// Sanitize
///

pub trait Sanitize: SanitizeAuto + SanitizeCustom {}

impl<T> Sanitize for T where T: SanitizeAuto + SanitizeCustom {}

///
/// SanitizeAuto
///
/// Schema-declared sanitization.
/// Must mutate only `self`.
/// Must NOT recurse.
///

pub trait SanitizeAuto {
    fn sanitize_self(&mut self, _ctx: &mut dyn VisitorContext) {}
}

///
/// SanitizeCustom
///
/// User-defined sanitization hooks.
/// Same rules as `SanitizeAuto`.
///

pub trait SanitizeCustom {
    fn sanitize_custom(&mut self, _ctx: &mut dyn VisitorContext) {}
}

///
/// ValidateAuto
///
/// Schema-declared validation.
/// Must NOT recurse, aggregate, or fail-fast.
/// Reports issues via `VisitorContext`.
///

pub trait ValidateAuto {
    /// Validate this node according to schema-defined rules.
    fn validate_self(&self, _ctx: &mut dyn VisitorContext) {}
}

///
/// ValidateCustom
///
/// User-defined validation hooks.
/// Also must NOT recurse or aggregate.
///

pub trait ValidateCustom {
    /// Custom validation logic for this node.
    fn validate_custom(&self, _ctx: &mut dyn VisitorContext) {}
}

// impl_primitive
// Leaf impls: primitives carry no schema rules of their own.
macro_rules! impl_primitive {
    ($($type:ty),* $(,)?) => {
        $(
            impl Visitable for $type {}
            impl SanitizeAuto for $type {}
            impl SanitizeCustom for $type {}
            impl ValidateAuto for $type {}
            impl ValidateCustom for $type {}
        )*
    };
}

impl_primitive!(
    bool,
    f32,
    f64,
    i8,
    i16,
    i32,
    i64,
    i128,
    u8,
    u16,
    u32,
    u64,
    u128,
    String,
);

// Option<T> visits its inner value when present; the `Some` payload
// keeps the parent path (no extra segment).
impl<T: Visitable> Visitable for Option<T> {
    fn drive(&self, visitor: &mut dyn VisitorCore) {
        if let Some(inner) = self {
            perform_visit(visitor, inner, crate::visitor::PathSegment::Empty);
        }
    }

    fn drive_mut(&mut self, visitor: &mut dyn VisitorMutCore) {
        if let Some(inner) = self {
            perform_visit_mut(visitor, inner, crate::visitor::PathSegment::Empty);
        }
    }
}

impl<T> SanitizeAuto for Option<T> {}
impl<T> SanitizeCustom for Option<T> {}
impl<T> ValidateAuto for Option<T> {}
impl<T> ValidateCustom for Option<T> {}

impl<T: Visitable> Visitable for Vec<T> {
    fn drive(&self, visitor: &mut dyn VisitorCore) {
        for (index, item) in self.iter().enumerate() {
            perform_visit(visitor, item, index);
        }
    }

    fn drive_mut(&mut self, visitor: &mut dyn VisitorMutCore) {
        for (index, item) in self.iter_mut().enumerate() {
            perform_visit_mut(visitor, item, index);
        }
    }
}

impl<T> SanitizeAuto for Vec<T> {}
impl<T> SanitizeCustom for Vec<T> {}
impl<T> ValidateAuto for Vec<T> {}
impl<T> ValidateCustom for Vec<T> {}
