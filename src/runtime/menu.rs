//! Fixed navigation menu: trending stories and the category pages.
//!
//! The menu is reachable from every screen of the terminal front-end, so the
//! listings that are otherwise only CLI subcommands can be opened interactively.

use super::navigator::Route;
use crate::ui::viewmodel::{DisplayItem, FooterInfo, HeaderInfo, MenuViewModel};

/// Category pages, in menu order. Routes use the lowercased name.
pub const CATEGORIES: [&str; 9] = [
    "Tech",
    "Science",
    "Games",
    "Business",
    "Ai",
    "Programming",
    "Startups",
    "Cybersecurity",
    "Design",
];

/// Label of the first entry, which opens the front page.
pub const TRENDING_LABEL: &str = "Currently Trending";

/// One selectable destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub route: Route,
}

/// Menu cursor over [`NavigationMenu::entries`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationMenu {
    selected: usize,
}

impl NavigationMenu {
    /// Trending first, then every entry of [`CATEGORIES`].
    #[must_use]
    pub fn entries() -> Vec<MenuEntry> {
        std::iter::once(MenuEntry {
            label: TRENDING_LABEL,
            route: Route::FrontPage,
        })
        .chain(CATEGORIES.iter().map(|&label| MenuEntry {
            label,
            route: Route::Category {
                name: label.to_lowercase(),
            },
        }))
        .collect()
    }

    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Moves down, wrapping to the first entry.
    pub fn move_down(&mut self) {
        self.selected = (self.selected + 1) % (CATEGORIES.len() + 1);
    }

    /// Moves up, wrapping to the last entry.
    pub fn move_up(&mut self) {
        self.selected = self.selected.checked_sub(1).unwrap_or(CATEGORIES.len());
    }

    /// Selects entry `index` if it exists.
    pub fn select(&mut self, index: usize) {
        if index <= CATEGORIES.len() {
            self.selected = index;
        }
    }

    /// Route of the highlighted entry.
    #[must_use]
    pub fn route(&self) -> Route {
        Self::entries()
            .swap_remove(self.selected)
            .route
    }

    #[must_use]
    pub fn viewmodel(&self) -> MenuViewModel {
        MenuViewModel {
            header: HeaderInfo {
                title: " Browse Hacker News ".to_string(),
            },
            items: Self::entries()
                .into_iter()
                .enumerate()
                .map(|(idx, entry)| DisplayItem {
                    label: entry.label.to_string(),
                    is_active: idx == self.selected,
                    highlight_ranges: vec![],
                })
                .collect(),
            footer: FooterInfo {
                keybindings: "↑/↓: select  Enter: open  0-9: jump  Esc: back  Ctrl+c: quit".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trending_comes_first_then_categories() {
        let entries = NavigationMenu::entries();

        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].route, Route::FrontPage);
        assert_eq!(entries[1].route, Route::Category { name: "tech".into() });
        assert_eq!(entries[9].label, "Design");
        assert_eq!(entries[9].route.to_path(), "/design");
    }

    #[test]
    fn cursor_wraps_both_ways() {
        let mut menu = NavigationMenu::default();
        assert_eq!(menu.route(), Route::FrontPage);

        menu.move_up();
        assert_eq!(menu.route(), Route::Category { name: "design".into() });

        menu.move_down();
        menu.move_down();
        assert_eq!(menu.selected(), 1);
        assert_eq!(menu.route().to_path(), "/tech");
    }

    #[test]
    fn select_ignores_out_of_range() {
        let mut menu = NavigationMenu::default();
        menu.select(5);
        assert_eq!(menu.route(), Route::Category { name: "ai".into() });

        menu.select(10);
        assert_eq!(menu.selected(), 5);
    }

    #[test]
    fn viewmodel_marks_only_the_selection() {
        let mut menu = NavigationMenu::default();
        menu.move_down();

        let vm = menu.viewmodel();
        let active: Vec<_> = vm.items.iter().filter(|i| i.is_active).map(|i| i.label.as_str()).collect();
        assert_eq!(active, ["Tech"]);
    }
}
