//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` so they depend only
//! on driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, AccountQuery, InventoryCommand, InventoryQuery, SavedDishesCommand,
    SuggestionQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    /// Token verification and profile lookup; also used by the bearer
    /// extractor.
    pub sessions: Arc<dyn AccountQuery>,
    pub inventory: Arc<dyn InventoryCommand>,
    pub inventory_query: Arc<dyn InventoryQuery>,
    pub suggestions: Arc<dyn SuggestionQuery>,
    pub saved_dishes: Arc<dyn SavedDishesCommand>,
}
