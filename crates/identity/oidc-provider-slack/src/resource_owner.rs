//! Typed view over the Slack `openid.connect.userInfo` payload.
//!
//! Every accessor returns `None` when its field is missing, null, of an
//! unexpected JSON type, or falsy (`""`, `0`, `false`). In particular
//! [`SlackResourceOwner::is_email_verified`] and
//! [`SlackResourceOwner::is_team_image_default`] only ever return `Some(true)`;
//! use [`SlackResourceOwner::to_map`] to tell an explicit `false` apart from a
//! missing field.

use oidc_oauth2_client::{ResourceOwner, ResponseBody};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field names of the Slack profile payload.
pub mod claims {
    pub const SUBJECT: &str = "sub";
    pub const USER_ID: &str = "https://slack.com/user_id";
    pub const TEAM_ID: &str = "https://slack.com/team_id";
    pub const EMAIL: &str = "email";
    pub const EMAIL_VERIFIED: &str = "email_verified";
    pub const DATE_EMAIL_VERIFIED: &str = "date_email_verified";
    pub const NAME: &str = "name";
    pub const PICTURE: &str = "picture";
    pub const GIVEN_NAME: &str = "given_name";
    pub const FAMILY_NAME: &str = "family_name";
    pub const LOCALE: &str = "locale";
    pub const TEAM_NAME: &str = "https://slack.com/team_name";
    pub const TEAM_DOMAIN: &str = "https://slack.com/team_domain";
    pub const USER_IMAGE_24: &str = "https://slack.com/user_image_24";
    pub const USER_IMAGE_32: &str = "https://slack.com/user_image_32";
    pub const USER_IMAGE_48: &str = "https://slack.com/user_image_48";
    pub const USER_IMAGE_72: &str = "https://slack.com/user_image_72";
    pub const USER_IMAGE_192: &str = "https://slack.com/user_image_192";
    pub const USER_IMAGE_512: &str = "https://slack.com/user_image_512";
    pub const USER_IMAGE_1024: &str = "https://slack.com/user_image_1024";
    pub const TEAM_IMAGE_34: &str = "https://slack.com/team_image_34";
    pub const TEAM_IMAGE_44: &str = "https://slack.com/team_image_44";
    pub const TEAM_IMAGE_68: &str = "https://slack.com/team_image_68";
    pub const TEAM_IMAGE_88: &str = "https://slack.com/team_image_88";
    pub const TEAM_IMAGE_102: &str = "https://slack.com/team_image_102";
    pub const TEAM_IMAGE_132: &str = "https://slack.com/team_image_132";
    pub const TEAM_IMAGE_230: &str = "https://slack.com/team_image_230";
    pub const TEAM_IMAGE_DEFAULT: &str = "https://slack.com/team_image_default";
}

/// Slack user and team profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlackResourceOwner {
    response: ResponseBody,
}

impl SlackResourceOwner {
    pub fn new(response: ResponseBody) -> Self {
        Self { response }
    }

    /// The whole payload, including fields without a dedicated accessor.
    pub fn to_map(&self) -> &ResponseBody {
        &self.response
    }

    pub fn into_map(self) -> ResponseBody {
        self.response
    }

    fn string(&self, key: &str) -> Option<&str> {
        self.response
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    fn flag(&self, key: &str) -> Option<bool> {
        self.response
            .get(key)
            .and_then(Value::as_bool)
            .filter(|value| *value)
    }

    fn integer(&self, key: &str) -> Option<i64> {
        self.response
            .get(key)
            .and_then(Value::as_i64)
            .filter(|value| *value != 0)
    }

    /// Slack user id (`U...`).
    pub fn id(&self) -> Option<&str> {
        self.string(claims::USER_ID)
    }

    /// OpenID Connect subject; Slack sets it to the user id.
    pub fn subject(&self) -> Option<&str> {
        self.string(claims::SUBJECT)
    }

    pub fn team_id(&self) -> Option<&str> {
        self.string(claims::TEAM_ID)
    }

    pub fn email(&self) -> Option<&str> {
        self.string(claims::EMAIL)
    }

    pub fn is_email_verified(&self) -> Option<bool> {
        self.flag(claims::EMAIL_VERIFIED)
    }

    /// Unix timestamp of the email verification.
    pub fn date_email_verified(&self) -> Option<i64> {
        self.integer(claims::DATE_EMAIL_VERIFIED)
    }

    pub fn name(&self) -> Option<&str> {
        self.string(claims::NAME)
    }

    pub fn picture(&self) -> Option<&str> {
        self.string(claims::PICTURE)
    }

    pub fn given_name(&self) -> Option<&str> {
        self.string(claims::GIVEN_NAME)
    }

    pub fn family_name(&self) -> Option<&str> {
        self.string(claims::FAMILY_NAME)
    }

    pub fn locale(&self) -> Option<&str> {
        self.string(claims::LOCALE)
    }

    pub fn team_name(&self) -> Option<&str> {
        self.string(claims::TEAM_NAME)
    }

    pub fn team_domain(&self) -> Option<&str> {
        self.string(claims::TEAM_DOMAIN)
    }

    pub fn user_image_24px(&self) -> Option<&str> {
        self.string(claims::USER_IMAGE_24)
    }

    pub fn user_image_32px(&self) -> Option<&str> {
        self.string(claims::USER_IMAGE_32)
    }

    pub fn user_image_48px(&self) -> Option<&str> {
        self.string(claims::USER_IMAGE_48)
    }

    pub fn user_image_72px(&self) -> Option<&str> {
        self.string(claims::USER_IMAGE_72)
    }

    pub fn user_image_192px(&self) -> Option<&str> {
        self.string(claims::USER_IMAGE_192)
    }

    pub fn user_image_512px(&self) -> Option<&str> {
        self.string(claims::USER_IMAGE_512)
    }

    /// Part of the schema, but Slack does not currently send it.
    pub fn user_image_1024px(&self) -> Option<&str> {
        self.string(claims::USER_IMAGE_1024)
    }

    pub fn team_image_34px(&self) -> Option<&str> {
        self.string(claims::TEAM_IMAGE_34)
    }

    pub fn team_image_44px(&self) -> Option<&str> {
        self.string(claims::TEAM_IMAGE_44)
    }

    pub fn team_image_68px(&self) -> Option<&str> {
        self.string(claims::TEAM_IMAGE_68)
    }

    pub fn team_image_88px(&self) -> Option<&str> {
        self.string(claims::TEAM_IMAGE_88)
    }

    pub fn team_image_102px(&self) -> Option<&str> {
        self.string(claims::TEAM_IMAGE_102)
    }

    pub fn team_image_132px(&self) -> Option<&str> {
        self.string(claims::TEAM_IMAGE_132)
    }

    pub fn team_image_230px(&self) -> Option<&str> {
        self.string(claims::TEAM_IMAGE_230)
    }

    pub fn is_team_image_default(&self) -> Option<bool> {
        self.flag(claims::TEAM_IMAGE_DEFAULT)
    }
}

impl ResourceOwner for SlackResourceOwner {
    fn id(&self) -> Option<&str> {
        SlackResourceOwner::id(self)
    }

    fn to_map(&self) -> &ResponseBody {
        SlackResourceOwner::to_map(self)
    }
}

impl From<ResponseBody> for SlackResourceOwner {
    fn from(response: ResponseBody) -> Self {
        Self::new(response)
    }
}
