//! Career categories and the page-wide highlight selection.

use std::cell::Cell;
use std::rc::Rc;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Ai,
    Data,
    Ops,
    Clinical,
    Automation,
    Brand,
    Founder,
}

impl Category {
    /// Short tags shown in the "Focus Area" card for a career node.
    pub fn focus_tags(self) -> &'static [&'static str] {
        match self {
            Category::Ai | Category::Data => &["AI Agents", "Analytics"],
            Category::Ops | Category::Clinical => &["Revenue Cycle", "Team Mgmt"],
            Category::Founder | Category::Brand | Category::Automation => &["Strategy", "Growth"],
        }
    }

    /// CSS class of the accent dot next to the node label.
    pub fn accent_class(self) -> &'static str {
        match self {
            Category::Ai => "accent-ai",
            Category::Ops => "accent-ops",
            _ => "accent-other",
        }
    }
}

/// The category currently emphasised on the page, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveCategory {
    #[default]
    None,
    Selected(Category),
}

impl ActiveCategory {
    /// Whether an item tagged `tag` is emphasised under this selection.
    pub fn highlights(self, tag: Category) -> bool {
        let ActiveCategory::Selected(active) = self else {
            return false;
        };
        match active {
            Category::Founder => true,
            Category::Ai => matches!(tag, Category::Ai | Category::Data),
            Category::Ops => matches!(tag, Category::Ops | Category::Clinical),
            other => other == tag,
        }
    }
}

impl From<Category> for ActiveCategory {
    fn from(category: Category) -> Self {
        ActiveCategory::Selected(category)
    }
}

/// Owner side of the active category. Only the owner can change it.
#[derive(Debug, Default)]
pub struct CategorySelection(Rc<Cell<ActiveCategory>>);

impl CategorySelection {
    pub fn new(initial: ActiveCategory) -> Self {
        Self(Rc::new(Cell::new(initial)))
    }

    pub fn set(&self, active: ActiveCategory) {
        self.0.set(active);
    }

    pub fn get(&self) -> ActiveCategory {
        self.0.get()
    }

    /// Read-only handle for renderers.
    pub fn view(&self) -> CategoryView {
        CategoryView(Rc::clone(&self.0))
    }
}

#[derive(Debug, Clone)]
pub struct CategoryView(Rc<Cell<ActiveCategory>>);

impl CategoryView {
    pub fn get(&self) -> ActiveCategory {
        self.0.get()
    }
}

impl From<ActiveCategory> for CategoryView {
    /// A view nobody can change.
    fn from(active: ActiveCategory) -> Self {
        CategoryView(Rc::new(Cell::new(active)))
    }
}
