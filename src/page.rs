//! Page-level interactive state: the selected career node and the category
//! it puts in focus.

use crate::category::{ActiveCategory, CategorySelection, CategoryView};
use crate::content::{CareerNode, ContentStore};

pub struct Page {
    content: ContentStore,
    selected: usize,
    selection: CategorySelection,
}

impl Page {
    /// Page with the first career node selected.
    pub fn new(content: ContentStore) -> Self {
        let selection = CategorySelection::new(
            content
                .career()
                .first()
                .map(|node| ActiveCategory::from(node.category))
                .unwrap_or_default(),
        );
        Self {
            content,
            selected: 0,
            selection,
        }
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&CareerNode> {
        self.content.career().get(self.selected)
    }

    /// Select career node `index`. Returns `false` and changes nothing when
    /// the index is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(node) = self.content.career().get(index) else {
            log::warn!("ignoring selection of missing career node {index}");
            return false;
        };
        self.selected = index;
        self.selection.set(node.category.into());
        true
    }

    pub fn active_category(&self) -> ActiveCategory {
        self.selection.get()
    }

    /// Handle the orbit renderer reads the highlight from.
    pub fn category_view(&self) -> CategoryView {
        self.selection.view()
    }

    pub fn timeline_progress(&self) -> f64 {
        self.content.timeline_progress(self.selected)
    }
}

/// How far the document has been scrolled, in `[0, 1]`.
pub fn scroll_progress(scroll_y: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if !(scrollable > 0.0) {
        return 0.0;
    }
    (scroll_y / scrollable).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;

    fn page() -> Page {
        Page::new(ContentStore::embedded().unwrap())
    }

    #[test]
    fn starts_on_the_first_node() {
        let page = page();
        assert_eq!(page.selected_index(), 0);
        assert_eq!(page.active_category(), ActiveCategory::Selected(Category::Ai));
        assert_eq!(page.timeline_progress(), 0.0);
    }

    #[test]
    fn selecting_updates_the_shared_category() {
        let mut page = page();
        let view = page.category_view();
        assert!(page.select(2));
        assert_eq!(view.get(), ActiveCategory::Selected(Category::Founder));
        assert_eq!(page.selected().map(|n| n.id.as_str()), Some("earlier-founder"));
        assert!((page.timeline_progress() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut page = page();
        page.select(1);
        assert!(!page.select(4));
        assert_eq!(page.selected_index(), 1);
        assert_eq!(page.active_category(), ActiveCategory::Selected(Category::Ops));
    }

    #[test]
    fn scroll_progress_is_clamped() {
        assert_eq!(scroll_progress(0.0, 3000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(1000.0, 3000.0, 1000.0), 0.5);
        assert_eq!(scroll_progress(5000.0, 3000.0, 1000.0), 1.0);
        assert_eq!(scroll_progress(-20.0, 3000.0, 1000.0), 0.0);
        // nothing to scroll
        assert_eq!(scroll_progress(10.0, 800.0, 1000.0), 0.0);
    }
}
