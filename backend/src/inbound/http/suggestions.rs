//! Dish suggestions for soon-to-expire pantry items.

use actix_web::{get, web};
use serde::Serialize;
use serde_json::json;

use crate::domain::ports::SuggestionOutcome;
use crate::domain::{Error, Suggestion};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Successful suggestions payload.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SuggestionsResponse {
    pub dishes: Vec<Suggestion>,
}

fn outcome_to_response(outcome: SuggestionOutcome) -> ApiResult<SuggestionsResponse> {
    match outcome {
        SuggestionOutcome::NoIngredients => Err(Error::not_found(
            "No ingredients found for this user",
        )
        .with_details(json!({ "code": "no_ingredients" }))),
        SuggestionOutcome::NoDishes => Err(Error::not_found("No dish suggestions available")
            .with_details(json!({ "code": "no_dishes" }))),
        SuggestionOutcome::Dishes(dishes) => Ok(SuggestionsResponse { dishes }),
    }
}

/// Suggest dishes that use items expiring within the suggestion window.
#[utoipa::path(
    get,
    path = "/api/v1/pantry/suggestions",
    responses(
        (status = 200, description = "Suggested dishes", body = SuggestionsResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "No candidate ingredients or no matching dishes", body = Error)
    ),
    tags = ["suggestions"],
    operation_id = "suggestDishes"
)]
#[get("/pantry/suggestions")]
pub async fn suggest_dishes(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<SuggestionsResponse>> {
    let outcome = state.suggestions.suggest_for_user(user.id()).await?;
    outcome_to_response(outcome).map(web::Json)
}
