use crate::catalog::Catalog;
use crate::error::{NameError, RenderError};
use crate::family::FamilySizeBand;
use crate::names::SectionNames;
use crate::packing::PackingList;
use handlebars::Handlebars;
use serde::Serialize;

const ORDER_FORM: &str = "order_form";
const PACKING_LIST: &str = "packing_list";

#[derive(Serialize)]
struct FormSection<'a> {
    section: &'a str,
    short: &'a str,
    items: &'a [String],
}

#[derive(Serialize)]
struct FormBand {
    label: &'static str,
    color: &'static str,
    checked: bool,
}

#[derive(Serialize)]
struct OrderForm<'a> {
    bands: Vec<FormBand>,
    sections: Vec<FormSection<'a>>,
}

/// Renders the order form and packing lists from the embedded templates
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry
            .register_template_string(ORDER_FORM, include_str!("./static/order_form.hbs"))
            .map_err(Box::new)?;
        registry
            .register_template_string(PACKING_LIST, include_str!("./static/packing_list.hbs"))
            .map_err(Box::new)?;
        Ok(Self { registry })
    }

    /// The order form page
    ///
    /// Every catalog section becomes a group of checkboxes named after its
    /// short identifier. Fails if a section has no identifier.
    pub fn render_form(&self, catalog: &Catalog, names: &SectionNames) -> Result<String, FormError> {
        let mut sections = Vec::with_capacity(catalog.len());
        for entry in catalog.entries() {
            sections.push(FormSection {
                section: &entry.section,
                short: names.short_name(&entry.section)?,
                items: &entry.items,
            });
        }

        let bands = FamilySizeBand::ALL
            .iter()
            .enumerate()
            .map(|(i, band)| FormBand {
                label: band.label(),
                color: band.color(),
                checked: i == 0,
            })
            .collect();

        let html = self
            .registry
            .render(ORDER_FORM, &OrderForm { bands, sections })
            .map_err(RenderError::from)?;
        Ok(html)
    }

    pub fn render_packing_list(&self, list: &PackingList) -> Result<String, RenderError> {
        Ok(self.registry.render(PACKING_LIST, list)?)
    }
}

/// Why the order form could not be produced
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    Names(#[from] NameError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
