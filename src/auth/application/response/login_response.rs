use serde::Deserialize;

/// The `UserSession` returned by `SessionManager.Login`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub full_name: String,
}
