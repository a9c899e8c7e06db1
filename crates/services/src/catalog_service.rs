use std::cmp::Ordering;
use std::sync::Arc;

use portal_core::model::{ContainerKind, ContainerStatus, ContainerSummary};
use storage::CatalogRepository;

use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CatalogSort {
    /// Soonest first; undated entries last.
    #[default]
    DueDate,
    Title,
}

/// Filters for assignment and practice list views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Case-insensitive match on title or subject. Empty matches everything.
    pub search: String,
    pub status: Option<ContainerStatus>,
    pub sort: CatalogSort,
}

impl CatalogQuery {
    #[must_use]
    pub fn matches(&self, item: &ContainerSummary) -> bool {
        if self.status.is_some_and(|status| status != item.status) {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || item.title.to_lowercase().contains(&needle)
            || item.subject.to_lowercase().contains(&needle)
    }

    /// Filter and sort `items` in place of a backend query.
    #[must_use]
    pub fn apply(&self, items: Vec<ContainerSummary>) -> Vec<ContainerSummary> {
        let mut items: Vec<_> = items.into_iter().filter(|i| self.matches(i)).collect();
        match self.sort {
            CatalogSort::DueDate => items.sort_by(|left, right| {
                match (left.due_at, right.due_at) {
                    (Some(l), Some(r)) => l.cmp(&r),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
                .then_with(|| left.title.cmp(&right.title))
            }),
            CatalogSort::Title => items.sort_by(|left, right| {
                left.title
                    .to_lowercase()
                    .cmp(&right.title.to_lowercase())
            }),
        }
        items
    }
}

/// Backs the assignment and practice list views.
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog }
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the listing fails.
    pub async fn list(
        &self,
        kind: ContainerKind,
        query: &CatalogQuery,
    ) -> Result<Vec<ContainerSummary>, CatalogError> {
        let items = self.catalog.list_containers(kind).await?;
        Ok(query.apply(items))
    }
}
