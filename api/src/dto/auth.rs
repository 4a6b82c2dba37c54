use serde::{Deserialize, Serialize};

/// Body of `POST /token/generate`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTokenRequest {
    pub provider_id: String,
}

/// Body of `POST /mobile/auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileLoginRequest {
    pub provider_id: String,

    /// Display name; the provider id is used when absent or blank
    #[serde(default)]
    pub user_nickname: Option<String>,
}

impl MobileLoginRequest {
    pub fn display_name(&self) -> &str {
        match self.user_nickname.as_deref().map(str::trim) {
            Some(nickname) if !nickname.is_empty() => nickname,
            _ => self.provider_id.trim(),
        }
    }
}

/// Body of `POST /mobile/auth/refresh`
///
/// Missing fields deserialize as empty strings so they surface as
/// invalid tokens rather than malformed JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileRefreshRequest {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

/// Identity resolved from the caller's access token
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub provider_id: String,
    pub roles: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_nickname_fallback() {
        let request: MobileLoginRequest =
            serde_json::from_str(r#"{"providerId":"kakao_42"}"#).unwrap();
        assert_eq!(request.display_name(), "kakao_42");

        let request: MobileLoginRequest =
            serde_json::from_str(r#"{"providerId":"kakao_42","userNickname":"  "}"#).unwrap();
        assert_eq!(request.display_name(), "kakao_42");

        let request: MobileLoginRequest =
            serde_json::from_str(r#"{"providerId":"kakao_42","userNickname":"dev"}"#).unwrap();
        assert_eq!(request.display_name(), "dev");
    }

    #[test]
    fn test_refresh_request_missing_fields_default_to_empty() {
        let request: MobileRefreshRequest =
            serde_json::from_str(r#"{"accessToken":"abc"}"#).unwrap();
        assert_eq!(request.access_token, "abc");
        assert!(request.refresh_token.is_empty());
    }

    #[test]
    fn test_me_response_uses_camel_case() {
        let json = serde_json::to_value(MeResponse {
            provider_id: "kakao_42".to_string(),
            roles: vec!["ROLE_USER".to_string()],
        })
        .unwrap();
        assert_eq!(json["providerId"], "kakao_42");
        assert_eq!(json["roles"][0], "ROLE_USER");
    }
}
