use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};

pub const THEME_KEY: &str = "theme";
pub const SELECTED_USER_KEY: &str = "selected_user";
pub const CHECKLIST_COLLAPSED_KEY: &str = "checklist_collapsed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

pub fn theme(store: &impl KeyValueStore) -> Theme {
    store
        .get(THEME_KEY)
        .and_then(|value| Theme::parse(&value))
        .unwrap_or_default()
}

pub fn set_theme(store: &mut impl KeyValueStore, theme: Theme) {
    store.set(THEME_KEY, theme.as_str().to_string());
}

pub fn selected_user(store: &impl KeyValueStore) -> Option<String> {
    store.get(SELECTED_USER_KEY).filter(|id| !id.is_empty())
}

pub fn set_selected_user(store: &mut impl KeyValueStore, user_id: &str) {
    store.set(SELECTED_USER_KEY, user_id.to_string());
}

pub fn checklist_collapsed(store: &impl KeyValueStore) -> bool {
    store.get(CHECKLIST_COLLAPSED_KEY).as_deref() == Some("true")
}

pub fn set_checklist_collapsed(store: &mut impl KeyValueStore, collapsed: bool) {
    store.set(CHECKLIST_COLLAPSED_KEY, collapsed.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStore;

    #[test]
    fn theme_defaults_to_dark_and_toggles() {
        let mut store = LocalStore::default();
        assert_eq!(theme(&store), Theme::Dark);

        let next = theme(&store).toggled();
        set_theme(&mut store, next);
        assert_eq!(theme(&store), Theme::Light);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn unknown_theme_falls_back_to_dark() {
        let mut store = LocalStore::default();
        store.set(THEME_KEY, "sepia".into());
        assert_eq!(theme(&store), Theme::Dark);
    }

    #[test]
    fn selection_and_collapse_are_remembered() {
        let mut store = LocalStore::default();
        assert_eq!(selected_user(&store), None);
        assert!(!checklist_collapsed(&store));

        set_selected_user(&mut store, "alex");
        set_checklist_collapsed(&mut store, true);
        assert_eq!(selected_user(&store).as_deref(), Some("alex"));
        assert!(checklist_collapsed(&store));
    }
}
