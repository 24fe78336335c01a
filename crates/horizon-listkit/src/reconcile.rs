//! Keeps trait membership attached to item identity across splices.

use std::collections::HashSet;

use crate::index_trait::IndexTrait;
use crate::row_source::RowSource;

/// Maps an item to a string that stays stable while the item is moved,
/// removed, or re-inserted.
pub trait IdentityProvider<T>: Send + Sync {
    fn id(&self, element: &T) -> String;
}

impl<T, F> IdentityProvider<T> for F
where
    F: Fn(&T) -> String + Send + Sync,
{
    fn id(&self, element: &T) -> String {
        self(element)
    }
}

/// Recomputes a trait across a splice of the row source.
///
/// Must run against the row source *before* it is spliced, since the
/// identities of the current members are read from it.
pub struct TraitReconciler<'a, T> {
    identity_provider: Option<&'a dyn IdentityProvider<T>>,
}

impl<'a, T> TraitReconciler<'a, T> {
    pub fn new(identity_provider: Option<&'a dyn IdentityProvider<T>>) -> Self {
        Self { identity_provider }
    }

    /// For each inserted item, whether it carries the trait after the splice.
    ///
    /// All `false` without an identity provider or when the trait is empty.
    pub fn inserted_flags(
        &self,
        target: &IndexTrait,
        source: &dyn RowSource<T>,
        inserted: &[T],
    ) -> Vec<bool> {
        let Some(provider) = self.identity_provider else {
            return vec![false; inserted.len()];
        };
        if target.is_empty() {
            return vec![false; inserted.len()];
        }

        let member_ids: HashSet<String> = target
            .get()
            .iter()
            .filter_map(|&index| source.element(index))
            .map(|element| provider.id(element))
            .collect();

        inserted
            .iter()
            .map(|element| member_ids.contains(&provider.id(element)))
            .collect()
    }

    /// Splice `target` for a replacement of `delete_count` rows at `start`
    /// by `inserted`.
    pub fn splice(
        &self,
        target: &mut IndexTrait,
        source: &dyn RowSource<T>,
        start: usize,
        delete_count: usize,
        inserted: &[T],
    ) {
        let flags = self.inserted_flags(target, source, inserted);
        target.splice(start, delete_count, &flags);
    }
}
