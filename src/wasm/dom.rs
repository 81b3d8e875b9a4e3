//! Renders the content records into the page shell and wires the career
//! timeline selection.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, Event, HtmlElement};

use super::render::Listener;
use crate::content::{CareerNode, CaseStudy, ContentStore, EducationKind};
use crate::page::{scroll_progress, Page};
use crate::{SiteError, SiteResult};

fn el(document: &Document, tag: &str, class: &str, text: Option<&str>) -> SiteResult<Element> {
    let element = document.create_element(tag)?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    if let Some(text) = text {
        element.set_text_content(Some(text));
    }
    Ok(element)
}

/// Looks up a mount point and empties it. Missing mount points just skip
/// that section.
fn slot(document: &Document, id: &str) -> Option<Element> {
    let Some(found) = document.get_element_by_id(id) else {
        log::warn!("#{id} not found, section skipped");
        return None;
    };
    found.set_inner_html("");
    Some(found)
}

fn render_steps(document: &Document, store: &ContentStore) -> SiteResult<()> {
    let Some(root) = slot(document, "steps") else {
        return Ok(());
    };
    for step in store.steps() {
        let card = el(document, "article", "holo-card step", None)?;
        let head = el(document, "div", "step-head", None)?;
        head.append_child(&el(document, "span", &format!("badge tone-{}", step.tone), None)?)?;
        let number = format!("STEP {}", step.step);
        head.append_child(&el(document, "span", "mono muted", Some(number.as_str()))?)?;
        card.append_child(&head)?;
        card.append_child(&el(document, "h3", "", Some(step.title.as_str()))?)?;
        card.append_child(&el(document, "p", "body", Some(step.description.as_str()))?)?;
        root.append_child(&card)?;
    }
    Ok(())
}

fn render_case_studies(document: &Document, store: &ContentStore) -> SiteResult<()> {
    let Some(root) = slot(document, "snapshots") else {
        return Ok(());
    };
    for (index, study) in store.case_studies().iter().enumerate() {
        let row = el(document, "div", "snapshot", None)?;
        let intro = el(document, "div", "snapshot-intro", None)?;
        intro.append_child(&el(document, "div", "ordinal", Some(CaseStudy::ordinal(index).as_str()))?)?;
        intro.append_child(&el(document, "h3", "", Some(study.title.as_str()))?)?;
        let quote = format!("\"{}\"", study.context);
        intro.append_child(&el(document, "p", "quote", Some(quote.as_str()))?)?;
        row.append_child(&intro)?;

        let card = el(document, "div", "holo-card snapshot-card", None)?;
        for (heading, class, body) in [
            ("Action", "action", &study.action),
            ("Result", "result", &study.result),
        ] {
            let column = el(document, "div", class, None)?;
            column.append_child(&el(document, "span", "mono", Some(heading))?)?;
            column.append_child(&el(document, "p", "", Some(body.as_str()))?)?;
            card.append_child(&column)?;
        }
        row.append_child(&card)?;
        root.append_child(&row)?;
    }
    Ok(())
}

fn render_education(document: &Document, store: &ContentStore) -> SiteResult<()> {
    let Some(root) = slot(document, "education-list") else {
        return Ok(());
    };
    for entry in store.education() {
        let icon = match entry.kind {
            EducationKind::Degree => "icon-degree",
            EducationKind::Certification => "icon-award",
        };
        let item = el(document, "div", "education-entry", None)?;
        item.append_child(&el(document, "span", icon, None)?)?;
        item.append_child(&el(document, "h3", "", Some(entry.title.as_str()))?)?;
        item.append_child(&el(document, "p", "mono accent", Some(entry.subtitle.as_str()))?)?;
        item.append_child(&el(document, "p", "body", Some(entry.body.as_str()))?)?;
        root.append_child(&item)?;
    }
    Ok(())
}

fn render_detail(document: &Document, node: &CareerNode) -> SiteResult<()> {
    let Some(root) = document.get_element_by_id("career-detail") else {
        return Ok(());
    };
    root.set_inner_html("");
    let head = el(document, "div", "detail-head", None)?;
    head.append_child(&el(document, "span", &format!("dot {}", node.category.accent_class()), None)?)?;
    head.append_child(&el(document, "span", "mono", Some(node.label.as_str()))?)?;
    root.append_child(&head)?;
    root.append_child(&el(document, "h3", "", Some(node.title.as_str()))?)?;
    root.append_child(&el(document, "p", "body", Some(node.description.as_str()))?)?;
    let list = el(document, "ul", "bullets", None)?;
    for bullet in &node.bullets {
        list.append_child(&el(document, "li", "", Some(bullet.as_str()))?)?;
    }
    root.append_child(&list)?;
    root.append_child(&el(document, "p", "mono muted", Some("TAKEAWAY"))?)?;
    let takeaway = format!("\"{}\"", node.takeaway);
    root.append_child(&el(document, "p", "takeaway", Some(takeaway.as_str()))?)?;

    if let Some(tags) = document.get_element_by_id("focus-tags") {
        tags.set_inner_html("");
        for tag in node.category.focus_tags() {
            tags.append_child(&el(document, "span", "tag", Some(tag))?)?;
        }
    }
    Ok(())
}

/// Reflect the page selection in the timeline buttons, bar and detail card.
fn sync_selection(document: &Document, page: &Page) -> SiteResult<()> {
    if let Some(timeline) = document.get_element_by_id("timeline") {
        let buttons = timeline.get_elements_by_tag_name("button");
        for index in 0..buttons.length() {
            if let Some(button) = buttons.item(index) {
                let active = index as usize == page.selected_index();
                button.class_list().toggle_with_force("active", active)?;
            }
        }
    }
    if let Some(bar) = styled(document, "timeline-progress") {
        set_style(&bar, "width", &format!("{}%", page.timeline_progress() * 100.0));
    }
    if let Some(node) = page.selected() {
        render_detail(document, node)?;
    }
    Ok(())
}

/// The content sections plus the timeline listeners.
pub struct PageView {
    _listeners: Vec<Listener>,
}

impl PageView {
    pub fn mount(document: &Document, page: Rc<RefCell<Page>>) -> SiteResult<Self> {
        {
            let page = page.borrow();
            render_steps(document, page.content())?;
            render_case_studies(document, page.content())?;
            render_education(document, page.content())?;
        }

        let mut listeners = Vec::new();
        if let Some(timeline) = slot(document, "timeline") {
            let nodes: Vec<CareerNode> = page.borrow().content().career().to_vec();
            for (index, node) in nodes.iter().enumerate() {
                let button = el(document, "button", "timeline-node", None)?;
                button.append_child(&el(document, "span", "era mono", Some(node.era().as_str()))?)?;
                button.append_child(&el(document, "span", "name", Some(node.short_label()))?)?;
                timeline.append_child(&button)?;

                let (page, document) = (page.clone(), document.clone());
                listeners.push(Listener::new(&button, "click", move |_: Event| {
                    let mut page = page.borrow_mut();
                    if page.select(index) {
                        if let Err(err) = sync_selection(&document, &page) {
                            log::error!("timeline update failed: {err}");
                        }
                    }
                })?);
            }
        }
        sync_selection(document, &page.borrow())?;

        let win = window().ok_or_else(|| SiteError::Js("no window".into()))?;
        let scroll_doc = document.clone();
        listeners.push(Listener::new(&win, "scroll", move |_: Event| {
            update_scroll_bar(&scroll_doc);
        })?);
        update_scroll_bar(document);

        Ok(Self {
            _listeners: listeners,
        })
    }
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        log::debug!("{property} not applied: {err:?}");
    }
}

fn styled(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
}

/// Drives the top progress bar and the vertical status gauge.
fn update_scroll_bar(document: &Document) {
    let (Some(win), Some(root)) = (window(), document.document_element()) else {
        return;
    };
    let scroll_y = win.scroll_y().unwrap_or(0.0);
    let viewport_height = win
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    let progress = scroll_progress(scroll_y, root.scroll_height() as f64, viewport_height);
    if let Some(bar) = styled(document, "scroll-progress") {
        set_style(&bar, "transform", &format!("scaleX({progress:.4})"));
    }
    if let Some(gauge) = styled(document, "scroll-gauge") {
        set_style(&gauge, "transform", &format!("scaleY({progress:.4})"));
    }
}
