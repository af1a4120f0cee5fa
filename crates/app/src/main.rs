use anyhow::Context;

use hearth_infra::StorageConfig;
use hearth_core::Entity;
use hearth_inventory::{InventoryStore, ShoppingView};

fn main() -> anyhow::Result<()> {
    hearth_observability::init();

    let config = StorageConfig::from_env().context("failed to load storage config")?;
    let storage = config.open_store()?;
    tracing::info!(data_dir = %config.data_dir.display(), "opening household");

    let mut store = InventoryStore::open(storage, config.keys.clone());
    if store.is_empty() {
        tracing::info!("empty household; seeding sample data");
        store.seed_sample();
    }

    tracing::info!(
        to_buy = store.shopping().view(ShoppingView::ToBuy).len(),
        checked = store.shopping().view(ShoppingView::Checked).len(),
        kitchen = store.kitchen().len(),
        recipes = store.recipes().len(),
        "household loaded"
    );

    for recipe in store.recipes().recipes() {
        let missing: Vec<String> = store
            .missing_ingredients(*recipe.id())
            .iter()
            .map(|m| format!("{} x{}", m.name, m.quantity))
            .collect();
        tracing::info!(recipe = recipe.name(), missing = ?missing, "recipe status");
    }

    Ok(())
}
