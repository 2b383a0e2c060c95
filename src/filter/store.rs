//! Filter store trait definition.
//!
//! This module defines the common interface for filter storage backends and
//! the strict batch loader built on top of it.

use std::path::Path;
use tracing::debug;

use crate::error::Result;

use super::types::PlanFilter;

/// Trait for filter storage backends.
pub trait FilterStore {
    /// Loads the filter stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter cannot be read or decoded.
    fn load(&self, path: &Path) -> Result<PlanFilter>;

    /// Saves `filter` to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter cannot be encoded or written.
    fn save(&self, path: &Path, filter: &PlanFilter) -> Result<()>;

    /// Gets the backend type name.
    fn backend_type(&self) -> &'static str;
}

impl<S: FilterStore + ?Sized> FilterStore for Box<S> {
    fn load(&self, path: &Path) -> Result<PlanFilter> {
        (**self).load(path)
    }

    fn save(&self, path: &Path, filter: &PlanFilter) -> Result<()> {
        (**self).save(path, filter)
    }

    fn backend_type(&self) -> &'static str {
        (**self).backend_type()
    }
}

/// Loads one filter per path, preserving order.
///
/// # Errors
///
/// Returns the first failure. Paths after a failing one are never read.
pub fn load_filters<S, P>(store: &S, paths: &[P]) -> Result<Vec<PlanFilter>>
where
    S: FilterStore + ?Sized,
    P: AsRef<Path>,
{
    debug!(
        "Loading {} filters from {} backend",
        paths.len(),
        store.backend_type()
    );

    let mut filters = Vec::with_capacity(paths.len());
    for path in paths {
        filters.push(store.load(path.as_ref())?);
    }
    Ok(filters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FilterError, ValidatorError};
    use crate::plan::Action;
    use mockall::mock;
    use mockall::predicate::eq;
    use std::path::PathBuf;

    mock! {
        Store {}

        impl FilterStore for Store {
            fn load(&self, path: &Path) -> Result<PlanFilter>;
            fn save(&self, path: &Path, filter: &PlanFilter) -> Result<()>;
            fn backend_type(&self) -> &'static str;
        }
    }

    fn create_filter(address: &str) -> PlanFilter {
        let mut filter = PlanFilter::new();
        filter.allow(address, Action::Create);
        filter
    }

    #[test]
    fn test_load_preserves_order() {
        let mut store = MockStore::new();
        store.expect_backend_type().return_const("mock");
        store
            .expect_load()
            .with(eq(Path::new("first.json")))
            .times(1)
            .returning(|_| Ok(create_filter("a.first")));
        store
            .expect_load()
            .with(eq(Path::new("second.json")))
            .times(1)
            .returning(|_| Ok(create_filter("b.second")));

        let filters = load_filters(&store, &["first.json", "second.json"]).expect("should load");

        assert_eq!(filters.len(), 2);
        assert!(filters[0].has_action("a.first", Action::Create));
        assert!(filters[1].has_action("b.second", Action::Create));
    }

    #[test]
    fn test_load_stops_at_first_failure() {
        let mut store = MockStore::new();
        store.expect_backend_type().return_const("mock");
        store
            .expect_load()
            .with(eq(Path::new("good.json")))
            .times(1)
            .returning(|_| Ok(create_filter("a.good")));
        store
            .expect_load()
            .with(eq(Path::new("missing.json")))
            .times(1)
            .returning(|path| {
                Err(FilterError::ReadFailure {
                    path: path.to_path_buf(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                }
                .into())
            });
        store
            .expect_load()
            .with(eq(Path::new("later.json")))
            .never();

        let err = load_filters(&store, &["good.json", "missing.json", "later.json"])
            .expect_err("should fail");

        match err {
            ValidatorError::Filter(FilterError::ReadFailure { path, .. }) => {
                assert_eq!(path, PathBuf::from("missing.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_boxed_store() {
        let mut store = MockStore::new();
        store.expect_backend_type().return_const("mock");
        store.expect_load().returning(|_| Ok(PlanFilter::new()));

        let boxed: Box<dyn FilterStore> = Box::new(store);
        assert_eq!(boxed.backend_type(), "mock");

        let filters = load_filters(&boxed, &[PathBuf::from("x.json")]).expect("should load");
        assert!(filters[0].is_empty());
    }
}
