//! Slideshow markup bindings

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::slides::{Direction, RevealTarget, SlideEffect};

/// Every slide state class, removed before a transition
const SLIDE_CLASSES: [&str; 4] = ["active", "exit-left", "exit-right", "enter-left"];

/// Collect the elements matching `selector` in document order
pub fn html_elements(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Handles for everything the slide controller writes to
pub struct SlideDom {
    slides: Vec<HtmlElement>,
    dots: Vec<HtmlElement>,
    current_counter: Option<Element>,
    total_counter: Option<Element>,
    hint: Option<HtmlElement>,
    timeline_items: Vec<HtmlElement>,
    letter_lines: Vec<HtmlElement>,
    signature: Option<HtmlElement>,
}

impl SlideDom {
    pub fn query(document: &Document) -> Self {
        let by_id = |id: &str| document.get_element_by_id(id);
        Self {
            slides: html_elements(document, ".slide"),
            dots: html_elements(document, ".nav-dot"),
            current_counter: by_id("current-slide"),
            total_counter: by_id("total-slides"),
            hint: by_id("swipe-hint").and_then(|el| el.dyn_into().ok()),
            timeline_items: html_elements(document, ".timeline-item"),
            letter_lines: html_elements(document, ".letter-line"),
            signature: document
                .query_selector(".letter-signature")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into().ok()),
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn dots(&self) -> &[HtmlElement] {
        &self.dots
    }

    pub fn timeline_len(&self) -> usize {
        self.timeline_items.len()
    }

    pub fn letter_len(&self) -> usize {
        self.letter_lines.len()
    }

    pub fn has_signature(&self) -> bool {
        self.signature.is_some()
    }

    pub fn apply_all(&self, effects: &[SlideEffect]) {
        for effect in effects {
            self.apply(effect);
        }
    }

    pub fn apply(&self, effect: &SlideEffect) {
        match *effect {
            SlideEffect::SetTotal(total) => set_text(self.total_counter.as_ref(), total),
            SlideEffect::Activate(index) => {
                if let Some(slide) = self.slides.get(index) {
                    let _ = slide.class_list().add_1("active");
                }
            }
            SlideEffect::Transition {
                from,
                to,
                direction,
            } => self.transition(from, to, direction),
            SlideEffect::MarkIndicator(index) => {
                for dot in &self.dots {
                    let _ = dot.class_list().remove_1("active");
                }
                if let Some(dot) = self.dots.get(index) {
                    let _ = dot.class_list().add_1("active");
                }
            }
            SlideEffect::SetCounter(n) => set_text(self.current_counter.as_ref(), n),
            SlideEffect::HideHint => {
                if let Some(hint) = &self.hint {
                    let _ = hint.style().set_property("display", "none");
                }
            }
            SlideEffect::Conceal(target) => {
                if let Some(el) = self.reveal_element(target) {
                    let _ = el.class_list().remove_1("visible");
                }
            }
            SlideEffect::Reveal(target) => {
                if let Some(el) = self.reveal_element(target) {
                    let _ = el.class_list().add_1("visible");
                }
            }
            SlideEffect::Settled => {}
        }
    }

    fn transition(&self, from: usize, to: usize, direction: Direction) {
        let (Some(old), Some(new)) = (self.slides.get(from), self.slides.get(to)) else {
            return;
        };

        for slide in &self.slides {
            for class in SLIDE_CLASSES {
                let _ = slide.class_list().remove_1(class);
            }
        }

        match direction {
            Direction::Forward => {
                let _ = old.class_list().add_1("exit-left");
                let _ = new.style().set_property("transform", "translateX(100%)");
            }
            Direction::Backward => {
                let _ = old.class_list().add_1("exit-right");
                let _ = new.style().set_property("transform", "translateX(-100%)");
                let _ = new.class_list().add_1("enter-left");
            }
        }

        // Force a reflow so the start offset is committed before animating
        let _ = new.offset_width();

        let _ = new.style().remove_property("transform");
        let _ = new.class_list().remove_1("enter-left");
        let _ = new.class_list().add_1("active");
    }

    fn reveal_element(&self, target: RevealTarget) -> Option<&HtmlElement> {
        match target {
            RevealTarget::TimelineItem(i) => self.timeline_items.get(i),
            RevealTarget::LetterLine(i) => self.letter_lines.get(i),
            RevealTarget::Signature => self.signature.as_ref(),
        }
    }
}

fn set_text(el: Option<&Element>, value: usize) {
    if let Some(el) = el {
        el.set_text_content(Some(&value.to_string()));
    }
}
