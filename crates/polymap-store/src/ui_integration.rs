use crate::store::PolygonStore;
use anyhow::Context;
use parking_lot::Mutex;
use polymap_core::{validate_label, validate_name, CurrencyFormat, PolygonId, PolygonRecord};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonUiModel {
    pub id: String,
    pub name: String,
    pub price: String,
    pub price_label: String,
    pub color: String,
    pub vertex_count: usize,
    pub is_selected: bool,
}

impl PolygonUiModel {
    pub fn from_record(record: &PolygonRecord, currency: &CurrencyFormat) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            price: format!("{}", record.price),
            price_label: currency.format(Some(record.price)),
            color: record.color.to_string(),
            vertex_count: record.vertex_count(),
            is_selected: false, // Set separately
        }
    }
}

/// Details panel logic: selection, edit, and delete of saved polygons.
pub struct PolygonUiController {
    store: Arc<PolygonStore>,
    selected: Mutex<Option<PolygonId>>,
    currency: CurrencyFormat,
}

impl PolygonUiController {
    pub fn new(store: Arc<PolygonStore>) -> Self {
        Self::with_currency(store, CurrencyFormat::default())
    }

    pub fn with_currency(store: Arc<PolygonStore>, currency: CurrencyFormat) -> Self {
        Self {
            store,
            selected: Mutex::new(None),
            currency,
        }
    }

    /// Models for every stored polygon, in insertion order.
    pub fn get_ui_polygons(&self) -> Vec<PolygonUiModel> {
        let selected = self.selected.lock().clone();
        self.store
            .polygons()
            .iter()
            .map(|p| {
                let mut ui_model = PolygonUiModel::from_record(p, &self.currency);
                ui_model.is_selected = selected.as_ref() == Some(&p.id);
                ui_model
            })
            .collect()
    }

    pub fn select(&self, id: &PolygonId) -> anyhow::Result<PolygonRecord> {
        let record = self
            .store
            .get(id)
            .with_context(|| format!("No polygon with id {}", id))?;
        *self.selected.lock() = Some(id.clone());
        Ok(record)
    }

    pub fn clear_selection(&self) {
        *self.selected.lock() = None;
    }

    /// The selected record, if it is still stored.
    pub fn selected(&self) -> Option<PolygonRecord> {
        let id = self.selected.lock().clone()?;
        self.store.get(&id)
    }

    /// Applies the edit form to the selected polygon.
    ///
    /// Only name and price change; coordinates, color, and position in the
    /// collection are kept.
    pub fn edit_selected(&self, name: &str, price: &str) -> anyhow::Result<PolygonRecord> {
        let id = self
            .selected
            .lock()
            .clone()
            .context("No polygon selected")?;

        let price: f64 = price
            .trim()
            .parse()
            .with_context(|| format!("Price must be a number (got {})", price))?;
        let name = validate_label(name, price)?;

        self.apply_to_selected(id, |record| {
            record.name = name;
            record.price = price;
        })
    }

    /// Renames the selected polygon, keeping its stored price as is.
    ///
    /// Records saved without a price keep their zero price, which a full
    /// edit would reject.
    pub fn rename_selected(&self, name: &str) -> anyhow::Result<PolygonRecord> {
        let id = self
            .selected
            .lock()
            .clone()
            .context("No polygon selected")?;
        let name = validate_name(name)?;

        self.apply_to_selected(id, |record| record.name = name)
    }

    fn apply_to_selected<F>(&self, id: PolygonId, f: F) -> anyhow::Result<PolygonRecord>
    where
        F: FnOnce(&mut PolygonRecord),
    {
        if !self.store.update(&id, f) {
            self.clear_selection();
            anyhow::bail!("Selected polygon {} no longer exists", id);
        }

        self.store
            .get(&id)
            .with_context(|| format!("Polygon {} vanished after edit", id))
    }

    /// Deletes the selected polygon by id and clears the selection.
    pub fn delete_selected(&self) -> anyhow::Result<()> {
        let id = self
            .selected
            .lock()
            .take()
            .context("No polygon selected")?;
        if !self.store.delete_by_id(&id) {
            anyhow::bail!("Selected polygon {} no longer exists", id);
        }
        Ok(())
    }

    pub fn clear_all(&self) {
        self.clear_selection();
        self.store.clear_all();
    }

    pub fn store(&self) -> &Arc<PolygonStore> {
        &self.store
    }
}
