use axum::{extract::Path, Json};
use serde::Serialize;

use crate::catalog::{
    language_certifications, skill_suggestions, suggestion_catalog, SuggestionCatalog,
};

#[derive(Debug, Serialize)]
pub struct SuggestionList {
    pub key: String,
    pub suggestions: &'static [&'static str],
}

/// GET /api/v1/catalog/suggestions
/// Option lists and suggestion tables for every form.
pub async fn handle_get_suggestions() -> Json<SuggestionCatalog> {
    Json(suggestion_catalog())
}

/// GET /api/v1/catalog/skills/:category
pub async fn handle_skill_suggestions(Path(category): Path<String>) -> Json<SuggestionList> {
    let suggestions = skill_suggestions(&category);
    Json(SuggestionList {
        key: category,
        suggestions,
    })
}

/// GET /api/v1/catalog/languages/:language/certifications
pub async fn handle_language_certifications(
    Path(language): Path<String>,
) -> Json<SuggestionList> {
    let suggestions = language_certifications(&language);
    Json(SuggestionList {
        key: language,
        suggestions,
    })
}
