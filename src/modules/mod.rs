pub mod books;
pub mod purse;

use std::sync::Arc;

use bookstore_kernel::ModuleRegistry;

use crate::store::Store;

/// Register all bookstore modules against one shared store
pub fn register_all(registry: &mut ModuleRegistry, store: &Arc<Store>) {
    registry.register(books::create_module(Arc::clone(store)));
    registry.register(purse::create_module(Arc::clone(store)));
}
