//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::header::AUTHORIZATION;
use actix_web::web;

use crate::domain::UserId;
use crate::domain::ports::{
    MockAccountCommand, MockAccountQuery, MockInventoryCommand, MockInventoryQuery,
    MockSavedDishesCommand, MockSuggestionQuery,
};

use super::state::HttpState;

/// Token accepted by [`TestPorts::authenticate_as`].
pub const TEST_TOKEN: &str = "test-token";

/// Mocked driving ports; set expectations, then call [`Self::into_state`].
#[derive(Default)]
pub struct TestPorts {
    pub accounts: MockAccountCommand,
    pub sessions: MockAccountQuery,
    pub inventory: MockInventoryCommand,
    pub inventory_query: MockInventoryQuery,
    pub suggestions: MockSuggestionQuery,
    pub saved_dishes: MockSavedDishesCommand,
}

impl TestPorts {
    /// Resolve [`TEST_TOKEN`] to `user_id` for every request.
    pub fn authenticate_as(&mut self, user_id: UserId) {
        self.sessions
            .expect_authenticate()
            .withf(|token| token == TEST_TOKEN)
            .returning(move |_| Ok(user_id.clone()));
    }

    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            accounts: Arc::new(self.accounts),
            sessions: Arc::new(self.sessions),
            inventory: Arc::new(self.inventory),
            inventory_query: Arc::new(self.inventory_query),
            suggestions: Arc::new(self.suggestions),
            saved_dishes: Arc::new(self.saved_dishes),
        })
    }
}

/// `Authorization` header carrying [`TEST_TOKEN`].
pub fn bearer() -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {TEST_TOKEN}"))
}
