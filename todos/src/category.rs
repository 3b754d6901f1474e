//! Category store: state, actions and reducer.

use crate::error::TodoError;
use crate::reducer::TodoEnvironment;
use crate::types::{Category, CategoryId, DEFAULT_CATEGORY_COLOR, Owner};
use todocast_core::reducer::Reducer;

/// All categories, in insertion order
#[derive(Clone, Debug, Default)]
pub struct CategoryState {
    /// Every category of every owner
    pub categories: Vec<Category>,
}

impl CategoryState {
    /// Creates a new empty category state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    /// Returns a copy of `owner`'s categories in insertion order
    #[must_use]
    pub fn owned_by(&self, owner: &Owner) -> Vec<Category> {
        self.categories
            .iter()
            .filter(|c| &c.owner == owner)
            .cloned()
            .collect()
    }

    /// Returns the number of categories across all owners
    #[must_use]
    pub fn count(&self) -> usize {
        self.categories.len()
    }
}

/// Commands accepted by the category store
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategoryAction {
    /// Create a new category
    Create {
        /// Acting user, becomes the category's owner
        owner: Owner,
        /// Display name (trimmed, non-empty)
        name: String,
        /// Hex color, `#` optional; defaults to `#007bff`
        color: Option<String>,
    },
}

/// Reducer for the category store
#[derive(Clone, Debug, Default)]
pub struct CategoryReducer;

impl CategoryReducer {
    /// Creates a new `CategoryReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Trims a color and gives it a leading `#`, falling back to the default when empty
#[must_use]
pub fn normalize_color(color: Option<&str>) -> String {
    match color.map(str::trim) {
        None | Some("") => DEFAULT_CATEGORY_COLOR.to_string(),
        Some(c) if c.starts_with('#') => c.to_string(),
        Some(c) => format!("#{c}"),
    }
}

impl Reducer for CategoryReducer {
    type State = CategoryState;
    type Action = CategoryAction;
    type Environment = TodoEnvironment;
    type Output = Category;
    type Error = TodoError;

    fn reduce(
        &self,
        state: &mut CategoryState,
        action: CategoryAction,
        env: &TodoEnvironment,
    ) -> Result<Category, TodoError> {
        match action {
            CategoryAction::Create { owner, name, color } => {
                let name = name.trim();
                if name.is_empty() {
                    tracing::warn!(%owner, "Category rejected: empty name");
                    return Err(TodoError::validation("category name cannot be empty"));
                }

                let category = Category {
                    id: CategoryId::from_uuid(env.ids.next_id()),
                    owner,
                    name: name.to_string(),
                    color: normalize_color(color.as_deref()),
                    created_at: env.clock.now(),
                };

                state.categories.push(category.clone());
                tracing::debug!(id = %category.id, "Category created");
                Ok(category)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use todocast_testing::{ReducerTest, SequentialIds, test_clock};

    fn create_test_env() -> TodoEnvironment {
        TodoEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIds::new()))
    }

    fn owner(name: &str) -> Owner {
        Owner::parse(name).unwrap()
    }

    #[test]
    fn color_normalization() {
        assert_eq!(normalize_color(Some("ff0000")), "#ff0000");
        assert_eq!(normalize_color(Some(" #28a745 ")), "#28a745");
        assert_eq!(normalize_color(Some("  ")), DEFAULT_CATEGORY_COLOR);
        assert_eq!(normalize_color(None), DEFAULT_CATEGORY_COLOR);
    }

    #[test]
    fn create_trims_name_and_normalizes_color() {
        ReducerTest::new(CategoryReducer::new())
            .with_env(create_test_env())
            .given_state(CategoryState::new())
            .when_action(CategoryAction::Create {
                owner: owner("ayse"),
                name: "  Work ".to_string(),
                color: Some("ff0000".to_string()),
            })
            .then_state(|state| {
                assert_eq!(state.count(), 1);
                let category = &state.categories[0];
                assert_eq!(category.name, "Work");
                assert_eq!(category.color, "#ff0000");
            })
            .run();
    }

    #[test]
    fn create_rejects_blank_name() {
        ReducerTest::new(CategoryReducer::new())
            .with_env(create_test_env())
            .given_state(CategoryState::new())
            .when_action(CategoryAction::Create {
                owner: owner("ayse"),
                name: "   ".to_string(),
                color: None,
            })
            .then_state(|state| assert_eq!(state.count(), 0))
            .then_result(|result| {
                assert!(matches!(result, Err(TodoError::Validation { .. })));
            })
            .run();
    }

    #[test]
    fn owned_by_keeps_insertion_order() {
        let env = create_test_env();
        let reducer = CategoryReducer::new();
        let mut state = CategoryState::new();

        for (who, name) in [("ayse", "Work"), ("ali", "Gym"), ("ayse", "Home")] {
            reducer
                .reduce(
                    &mut state,
                    CategoryAction::Create {
                        owner: owner(who),
                        name: name.to_string(),
                        color: None,
                    },
                    &env,
                )
                .unwrap();
        }

        let names: Vec<_> = state
            .owned_by(&owner("ayse"))
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Work", "Home"]);
    }
}
