//! Contact form surface over the live `<form>` element.

use std::rc::Rc;

use tsm_site::{DomFormSurface, FormSnapshot, FormSurface, Selectors};
use web_sys::HtmlFormElement;

use crate::dom::WebDom;

/// Reads fields through the [`Dom`](tsm_site::Dom), resets with the form's
/// native `reset()` so selects and defaults are restored too.
pub struct WebFormSurface {
    fields: DomFormSurface,
    form: Option<HtmlFormElement>,
}

impl WebFormSurface {
    pub fn new(dom: Rc<WebDom>, selectors: Selectors, form: Option<HtmlFormElement>) -> Self {
        Self {
            fields: DomFormSurface::new(dom, selectors),
            form,
        }
    }
}

impl FormSurface for WebFormSurface {
    fn read(&self) -> FormSnapshot {
        self.fields.read()
    }

    fn reset(&self) {
        match &self.form {
            Some(form) => form.reset(),
            None => self.fields.reset(),
        }
    }
}
