//! End-to-end tests of the Slack adapter against a mock Slack API.

#[cfg(test)]
mod integration_tests {
    use crate::{SlackProvider, SlackProviderError, SlackResourceOwner};
    use oidc_oauth2_client::{
        AccessToken, AuthorizationOptions, AuthorizationResponse, InMemoryStateStore,
        OAuth2Client, OAuth2ClientConfig, OAuth2Error, ProviderAdapter, ResponseBody,
        TransportResponse,
    };
    use std::collections::HashMap;
    use std::sync::Arc;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SLACK_ORIGIN: &str = "https://slack.com";

    /// Sends Slack's requests to the mock server, keeping the paths.
    struct MockSlack {
        inner: SlackProvider,
        origin: String,
    }

    impl MockSlack {
        fn rewrite(&self, url: String) -> String {
            let path = url
                .strip_prefix(SLACK_ORIGIN)
                .expect("Slack endpoints live on slack.com");
            format!("{}{}", self.origin, path)
        }
    }

    impl ProviderAdapter for MockSlack {
        type Error = SlackProviderError;
        type Owner = SlackResourceOwner;

        fn base_authorization_url(&self) -> String {
            self.rewrite(self.inner.base_authorization_url())
        }

        fn base_access_token_url(&self, params: &HashMap<String, String>) -> String {
            self.rewrite(self.inner.base_access_token_url(params))
        }

        fn resource_owner_details_url(&self, token: &AccessToken) -> String {
            self.rewrite(self.inner.resource_owner_details_url(token))
        }

        fn default_scopes(&self) -> Vec<String> {
            self.inner.default_scopes()
        }

        fn check_response(
            &self,
            response: &TransportResponse,
            data: &ResponseBody,
        ) -> Result<(), Self::Error> {
            self.inner.check_response(response, data)
        }

        fn create_resource_owner(
            &self,
            response: ResponseBody,
            token: &AccessToken,
        ) -> SlackResourceOwner {
            self.inner.create_resource_owner(response, token)
        }
    }

    async fn setup() -> (MockServer, OAuth2Client<MockSlack>) {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let mock_server = MockServer::start().await;
        let provider = MockSlack {
            inner: SlackProvider,
            origin: mock_server.uri(),
        };
        let client = OAuth2Client::new(
            OAuth2ClientConfig::new("mock_client_id", "mock_secret", "none"),
            provider,
            Arc::new(InMemoryStateStore::new()),
        )
        .unwrap();

        (mock_server, client)
    }

    fn profile_body() -> serde_json::Value {
        serde_json::json!({
            "ok": true,
            "sub": "U0R7JM",
            "https://slack.com/user_id": "U0R7JM",
            "https://slack.com/team_id": "T0R7GR",
            "email": "krane@slack-corp.com",
            "email_verified": true,
            "date_email_verified": 1622128723,
            "name": "krane",
            "picture": "https://secure.gravatar.com/....png",
            "given_name": "Bront",
            "family_name": "Labradoodle",
            "locale": "en-US",
            "https://slack.com/team_name": "kraneflannel",
            "https://slack.com/team_domain": "kraneflannel",
            "https://slack.com/user_image_24": "https://avatars.example/u24.png",
            "https://slack.com/user_image_32": "https://avatars.example/u32.png",
            "https://slack.com/user_image_48": "https://avatars.example/u48.png",
            "https://slack.com/user_image_72": "https://avatars.example/u72.png",
            "https://slack.com/user_image_192": "https://avatars.example/u192.png",
            "https://slack.com/user_image_512": "https://avatars.example/u512.png",
            "https://slack.com/team_image_34": "https://avatars.example/t34.png",
            "https://slack.com/team_image_44": "https://avatars.example/t44.png",
            "https://slack.com/team_image_68": "https://avatars.example/t68.png",
            "https://slack.com/team_image_88": "https://avatars.example/t88.png",
            "https://slack.com/team_image_102": "https://avatars.example/t102.png",
            "https://slack.com/team_image_132": "https://avatars.example/t132.png",
            "https://slack.com/team_image_230": "https://avatars.example/t230.png",
            "https://slack.com/team_image_default": true
        })
    }

    #[tokio::test]
    async fn test_get_access_token() {
        let (mock_server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/api/openid.connect.token"))
            .and(body_string_contains("code=mock_authorization_code"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"access_token": "mock_access_token", "expires_in": 3600}"#,
                "json",
            ))
            .mount(&mock_server)
            .await;

        let before = unix_now();
        let token = client.access_token("mock_authorization_code").await.unwrap();

        assert_eq!(token.token(), "mock_access_token");
        let expires = token.expires.unwrap().timestamp();
        assert!(expires >= before + 3600);
        assert!(expires <= unix_now() + 3600);
        assert!(token.refresh_token.is_none());
        assert!(token.resource_owner_id.is_none());
    }

    #[tokio::test]
    async fn test_not_authed_raises_slack_error() {
        let (mock_server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/api/openid.connect.token"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_raw(r#"{"ok": false, "error": "not_authed"}"#, "json"),
            )
            .mount(&mock_server)
            .await;

        let error = client
            .access_token("mock_authorization_code")
            .await
            .unwrap_err();

        assert!(matches!(error, OAuth2Error::Provider(_)));
        let slack_error = error.provider_error::<SlackProviderError>().unwrap();
        assert_eq!(slack_error.error(), "not_authed");
        assert_eq!(slack_error.response().status.as_u16(), 401);
    }

    #[tokio::test]
    async fn test_get_resource_owner_details() {
        let (mock_server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/api/openid.connect.token"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                "access_token=mock_access_token&expires=3600&refresh_token=mock_refresh_token&otherKey={1234}",
                "application/x-www-form-urlencoded",
            ))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/openid.connect.userInfo"))
            .and(header("Authorization", "Bearer mock_access_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
            .mount(&mock_server)
            .await;

        let token = client.access_token("mock_authorization_code").await.unwrap();
        let user = client.resource_owner(&token).await.unwrap();

        assert_eq!(user.id(), Some("U0R7JM"));
        assert_eq!(user.to_map()["https://slack.com/user_id"], "U0R7JM");

        assert_eq!(user.subject(), Some("U0R7JM"));
        assert_eq!(user.team_id(), Some("T0R7GR"));
        assert_eq!(user.email(), Some("krane@slack-corp.com"));
        assert_eq!(user.is_email_verified(), Some(true));
        assert_eq!(user.date_email_verified(), Some(1622128723));
        assert_eq!(user.name(), Some("krane"));
        assert_eq!(user.picture(), Some("https://secure.gravatar.com/....png"));
        assert_eq!(user.given_name(), Some("Bront"));
        assert_eq!(user.family_name(), Some("Labradoodle"));
        assert_eq!(user.locale(), Some("en-US"));
        assert_eq!(user.team_name(), Some("kraneflannel"));
        assert_eq!(user.team_domain(), Some("kraneflannel"));
        assert_eq!(user.user_image_24px(), Some("https://avatars.example/u24.png"));
        assert_eq!(user.user_image_32px(), Some("https://avatars.example/u32.png"));
        assert_eq!(user.user_image_48px(), Some("https://avatars.example/u48.png"));
        assert_eq!(user.user_image_72px(), Some("https://avatars.example/u72.png"));
        assert_eq!(user.user_image_192px(), Some("https://avatars.example/u192.png"));
        assert_eq!(user.user_image_512px(), Some("https://avatars.example/u512.png"));
        assert_eq!(user.user_image_1024px(), None);
        assert_eq!(user.team_image_34px(), Some("https://avatars.example/t34.png"));
        assert_eq!(user.team_image_44px(), Some("https://avatars.example/t44.png"));
        assert_eq!(user.team_image_68px(), Some("https://avatars.example/t68.png"));
        assert_eq!(user.team_image_88px(), Some("https://avatars.example/t88.png"));
        assert_eq!(user.team_image_102px(), Some("https://avatars.example/t102.png"));
        assert_eq!(user.team_image_132px(), Some("https://avatars.example/t132.png"));
        assert_eq!(user.team_image_230px(), Some("https://avatars.example/t230.png"));
        assert_eq!(user.is_team_image_default(), Some(true));

        assert_eq!(serde_json::Value::Object(user.into_map()), profile_body());
    }

    #[tokio::test]
    async fn test_user_info_error_raises_slack_error() {
        let (mock_server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/api/openid.connect.token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "access_token": "xoxp-revoked"
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/openid.connect.userInfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": false,
                "error": "token_revoked"
            })))
            .mount(&mock_server)
            .await;

        let token = client.access_token("mock_authorization_code").await.unwrap();
        let error = client.resource_owner(&token).await.unwrap_err();

        let slack_error = error.provider_error::<SlackProviderError>().unwrap();
        assert_eq!(slack_error.error(), "token_revoked");
        assert_eq!(slack_error.response().status.as_u16(), 200);
    }

    #[tokio::test]
    async fn test_callback_flow() {
        let (mock_server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/api/openid.connect.token"))
            .and(body_string_contains("client_id=mock_client_id"))
            .and(body_string_contains("redirect_uri=none"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "access_token": "xoxp-1234",
                "token_type": "Bearer",
                "id_token": "eyJhbGciOi..."
            })))
            .mount(&mock_server)
            .await;

        let request = client
            .authorization_url(AuthorizationOptions::default())
            .await
            .unwrap();
        assert!(request.url.contains("/openid/connect/authorize"));
        assert!(request.url.contains("scope=openid+profile"));

        let token = client
            .handle_callback(AuthorizationResponse {
                code: "mock_authorization_code".to_string(),
                state: request.state,
                error: None,
                error_description: None,
            })
            .await
            .unwrap();

        assert_eq!(token.token(), "xoxp-1234");
        assert_eq!(token.values["id_token"], "eyJhbGciOi...");
    }

    fn unix_now() -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
    }
}
