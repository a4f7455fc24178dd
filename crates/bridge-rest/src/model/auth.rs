use serde::{Deserialize, Serialize};

/// The body returned by sign-in.
///
/// A `412` sign-in response carries the same body with `consented` false.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSessionInfo {
    pub session_token: String,
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub consented: bool,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub data_groups: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_optional_fields_default() {
        let info: UserSessionInfo = serde_json::from_value(json!({
            "sessionToken": "abc",
            "authenticated": true
        }))
        .unwrap();

        assert_eq!(info.session_token, "abc");
        assert!(info.authenticated);
        assert!(!info.consented);
        assert!(info.roles.is_empty());
        assert!(info.data_groups.is_empty());
    }

    #[test]
    fn data_groups_use_camel_case() {
        let info: UserSessionInfo = serde_json::from_value(json!({
            "sessionToken": "abc",
            "dataGroups": ["sdk-int-1"],
            "roles": ["developer"]
        }))
        .unwrap();

        assert_eq!(info.data_groups, vec!["sdk-int-1"]);
        assert_eq!(info.roles, vec!["developer"]);
    }
}
