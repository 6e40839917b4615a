use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const PROFILE_PATH: &str = "/api/seller/profile";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SellerProfile {
    pub id: Option<Uuid>,
    pub store_name: String,
    pub email: String,
    pub phone: String,
    pub description: String,
    pub address: String,
    pub eco_certification_id: String,
    pub expiry_date: String,
    pub eco_commitment: String,
    pub is_verified: Option<String>,
}

/// Profiles keyed by bearer token.
pub type Db = Arc<RwLock<HashMap<String, SellerProfile>>>;

type ApiError = (StatusCode, Json<Value>);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route(PROFILE_PATH, get(get_profile).post(save_profile))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty() && *t != "null")
        .map(str::to_string)
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"success": false, "message": "Not authorized, no token"})),
            )
        })
}

/// Field-level messages for every blank required field.
pub fn validate(profile: &SellerProfile) -> Map<String, Value> {
    let required = [
        ("storeName", &profile.store_name, "Store name is required"),
        ("email", &profile.email, "Email is required"),
        ("phone", &profile.phone, "Phone number is required"),
        ("description", &profile.description, "Description is required"),
        ("address", &profile.address, "Address is required"),
        ("ecoCommitment", &profile.eco_commitment, "Eco commitment is required"),
    ];
    required
        .into_iter()
        .filter(|(_, value, _)| value.trim().is_empty())
        .map(|(field, _, message)| (field.to_string(), Value::String(message.to_string())))
        .collect()
}

async fn get_profile(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)?;
    let profiles = db.read().await;
    let body = match profiles.get(&token) {
        Some(profile) => json!(profile),
        None => json!({}),
    };
    Ok(Json(body))
}

async fn save_profile(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<SellerProfile>,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)?;

    let errors = validate(&input);
    if !errors.is_empty() {
        let fields: Vec<&String> = errors.keys().collect();
        tracing::info!(?fields, "rejected profile update");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "message": "Validation failed", "errors": errors})),
        ));
    }

    let mut profiles = db.write().await;
    let existing = profiles.get(&token);
    let profile = SellerProfile {
        id: existing.and_then(|p| p.id).or_else(|| Some(Uuid::new_v4())),
        is_verified: existing
            .and_then(|p| p.is_verified.clone())
            .or_else(|| Some("Pending".to_string())),
        ..input
    };
    profiles.insert(token, profile.clone());

    Ok(Json(json!({
        "success": true,
        "message": "Profile updated",
        "profile": profile,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> SellerProfile {
        SellerProfile {
            store_name: "Green Goods".to_string(),
            email: "shop@example.com".to_string(),
            phone: "555-0100".to_string(),
            description: "Refill store".to_string(),
            address: "1 Market St".to_string(),
            eco_commitment: "Zero plastic".to_string(),
            ..SellerProfile::default()
        }
    }

    #[test]
    fn profile_serializes_camel_case() {
        let json = serde_json::to_value(complete()).unwrap();
        assert_eq!(json["storeName"], "Green Goods");
        assert_eq!(json["ecoCertificationId"], "");
        assert_eq!(json["isVerified"], Value::Null);
    }

    #[test]
    fn profile_accepts_partial_json() {
        let input: SellerProfile = serde_json::from_str(r#"{"storeName":"Shop"}"#).unwrap();
        assert_eq!(input.store_name, "Shop");
        assert!(input.phone.is_empty());
        assert!(input.id.is_none());
    }

    #[test]
    fn complete_profile_validates() {
        assert!(validate(&complete()).is_empty());
    }

    #[test]
    fn blank_phone_is_reported() {
        let mut profile = complete();
        profile.phone = " ".to_string();
        let errors = validate(&profile);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["phone"], "Phone number is required");
    }

    #[test]
    fn optional_fields_are_not_validated() {
        let mut profile = complete();
        profile.eco_certification_id.clear();
        profile.expiry_date.clear();
        assert!(validate(&profile).is_empty());
    }

    #[test]
    fn bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_err());

        headers.insert(AUTHORIZATION, "Bearer null".parse().unwrap());
        assert!(bearer_token(&headers).is_err());

        headers.insert(AUTHORIZATION, "Basic abc".parse().unwrap());
        assert!(bearer_token(&headers).is_err());

        headers.insert(AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert_eq!(bearer_token(&headers).unwrap(), "abc");
    }
}
