use crate::{
    db::{Db, executor::LoadExecutor, store::DataKey},
    error::{ErrorClass, ErrorOrigin, InternalError},
    obs::sink::{MetricsEvent, record},
    traits::{EntityKind, RawKey, StorageKey},
    types::Ulid,
};
use std::collections::BTreeSet;

///
/// RelationDef
///
/// One strong (delete-restricting) reference from a source entity field
/// to a target entity path.
///

#[derive(Clone, Copy, Debug)]
pub struct RelationDef {
    pub field: &'static str,
    pub target_path: &'static str,
}

///
/// RelationSource
///
/// Implemented by entities whose fields strongly reference other
/// entities. A strong reference blocks deletion of its target.
///

pub trait RelationSource: EntityKind {
    const STRONG_RELATIONS: &'static [RelationDef];

    /// The raw key this row holds for `field`, if any.
    fn relation_key(&self, field: &'static str) -> Option<RawKey>;
}

/// Validate that source rows do not strongly reference target keys
/// selected for delete.
///
/// The source store is scanned row by row; for the data volumes this
/// engine addresses a scan is the whole plan.
pub fn validate_delete_strong_relations_for_source<S>(
    db: &Db<S::Domain>,
    target_path: &str,
    deleted_target_keys: &BTreeSet<DataKey>,
) -> Result<(), InternalError>
where
    S: RelationSource,
{
    if deleted_target_keys.is_empty() {
        return Ok(());
    }

    let relations: Vec<&RelationDef> = S::STRONG_RELATIONS
        .iter()
        .filter(|relation| relation.target_path == target_path)
        .collect();

    if relations.is_empty() {
        return Ok(());
    }

    let sources = LoadExecutor::<S>::new(*db).all()?;

    record(MetricsEvent::RelationValidation {
        entity_path: S::PATH,
        source_scans: sources.len() as u64,
        blocked_deletes: 0,
    });

    for relation in relations {
        for source in sources.entities() {
            let Some(source_target) = source.relation_key(relation.field) else {
                continue;
            };

            let source_target_key = DataKey::from_parts(relation.target_path, source_target);
            if deleted_target_keys.contains(&source_target_key) {
                record(MetricsEvent::RelationValidation {
                    entity_path: S::PATH,
                    source_scans: 0,
                    blocked_deletes: 1,
                });

                return Err(InternalError::new(
                    ErrorClass::Conflict,
                    ErrorOrigin::Executor,
                    blocked_delete_diagnostic::<S>(relation, source.key(), &source_target_key),
                ));
            }
        }
    }

    Ok(())
}

/// Convenience wrapper for the common single-key case. A source with no
/// strong relation to the target has nothing to block.
pub fn validate_delete_one_strong_relation<S>(
    db: &Db<S::Domain>,
    target_path: &str,
    target_key: RawKey,
) -> Result<(), InternalError>
where
    S: RelationSource,
{
    let Some(relation) = S::STRONG_RELATIONS
        .iter()
        .find(|relation| relation.target_path == target_path)
    else {
        return Ok(());
    };

    let mut keys = BTreeSet::new();
    keys.insert(DataKey::from_parts(relation.target_path, target_key));

    validate_delete_strong_relations_for_source::<S>(db, target_path, &keys)
}

// Format operator-facing blocked-delete diagnostics with actionable context.
fn blocked_delete_diagnostic<S>(
    relation: &RelationDef,
    source_key: S::Key,
    target_key: &DataKey,
) -> String
where
    S: RelationSource,
{
    format!(
        "delete blocked by strong relation: source_entity={} source_field={} source_id={} target_key={target_key}; action=delete source rows or retarget relation before deleting target",
        S::PATH,
        relation.field,
        Ulid::from_bytes(source_key.to_raw()),
    )
}
