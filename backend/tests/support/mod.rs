//! Shared wiring for integration tests.
//!
//! Integration tests compile as separate crates, so the in-memory wiring the
//! binary performs is repeated here with a fixed clock and cheap bcrypt.
#![allow(dead_code, reason = "each test crate uses a subset of the helpers")]

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use pantry::Trace;
use pantry::domain::{
    AccountService, Dish, InventoryService, SavedDishesService, SuggestionPolicy,
    SuggestionService,
};
use pantry::inbound::http::configure_api;
use pantry::inbound::http::state::HttpState;
use pantry::outbound::memory::{InMemoryStore, StaticDishCatalogue};
use pantry::outbound::security::{BcryptPasswordHasher, JwtTokenService};

pub const SECRET: &[u8] = b"integration-secret-integration-secret";

/// Clock pinned to 2025-06-01T12:00:00Z.
pub struct FixedClock;

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }
}

pub fn dish(name: &str, ingredients: &[&str]) -> Dish {
    Dish::try_new(
        name,
        ingredients.iter().map(|item| (*item).to_owned()).collect(),
    )
    .expect("valid dish")
}

/// Ports backed by one in-memory store and a static catalogue.
pub fn in_memory_state(
    store: Arc<InMemoryStore>,
    dishes: Vec<Dish>,
    policy: SuggestionPolicy,
) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock);
    let accounts = Arc::new(AccountService::new(
        store.clone(),
        Arc::new(BcryptPasswordHasher::new(4)),
        Arc::new(JwtTokenService::new(SECRET)),
        clock.clone(),
    ));
    let inventory = Arc::new(InventoryService::new(store.clone(), clock.clone()));
    let suggestions = SuggestionService::new(
        store.clone(),
        Arc::new(StaticDishCatalogue::new(dishes)),
        clock.clone(),
    )
    .with_policy(policy);

    web::Data::new(HttpState {
        accounts: accounts.clone(),
        sessions: accounts,
        inventory: inventory.clone(),
        inventory_query: inventory,
        suggestions: Arc::new(suggestions),
        saved_dishes: Arc::new(SavedDishesService::new(store, clock)),
    })
}

pub fn app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure_api))
}
