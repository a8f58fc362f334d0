use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ring::hmac;
use ring::rand::{SecureRandom, SystemRandom};
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use tracing::debug;

use crate::error::PollError;
use crate::routes::AppState;

/// Identity of whoever issued the current call. Anonymous when `user_id` is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerContext {
    user_id: Option<String>,
}

impl CallerContext {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    /// An empty id is treated as no caller at all.
    pub fn user(user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        Self { user_id: (!user_id.is_empty()).then_some(user_id) }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn require(&self) -> Result<&str, PollError> {
        self.user_id().ok_or(PollError::Unauthenticated)
    }

    pub fn require_owner(&self, owner_id: &str) -> Result<&str, PollError> {
        match self.require()? {
            id if id == owner_id => Ok(id),
            _ => Err(PollError::NotOwner),
        }
    }
}

/// Signs and checks bearer tokens of the form `base64(user_id).base64(hmac)`.
pub struct SessionVerifier {
    key: hmac::Key,
}

impl SessionVerifier {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self { key: hmac::Key::new(hmac::HMAC_SHA256, secret.as_ref()) }
    }

    /// Random per-process key; tokens do not survive a restart.
    pub fn ephemeral() -> Result<Self, ring::error::Unspecified> {
        let mut secret = [0u8; 32];
        SystemRandom::new().fill(&mut secret)?;
        Ok(Self::new(secret))
    }

    pub fn issue(&self, user_id: &str) -> String {
        let tag = hmac::sign(&self.key, user_id.as_bytes());
        format!("{}.{}", URL_SAFE_NO_PAD.encode(user_id), URL_SAFE_NO_PAD.encode(tag.as_ref()))
    }

    pub fn verify(&self, token: &str) -> Option<String> {
        let (user_part, tag_part) = token.split_once('.')?;
        let user_id = URL_SAFE_NO_PAD.decode(user_part).ok()?;
        let tag = URL_SAFE_NO_PAD.decode(tag_part).ok()?;
        hmac::verify(&self.key, &user_id, &tag).ok()?;
        String::from_utf8(user_id).ok().filter(|id| !id.is_empty())
    }
}

/// Extracts the credentials of a `Bearer` authorization header; the scheme is case-insensitive.
pub fn bearer_credentials(header: &str) -> Option<&str> {
    let (scheme, credentials) = header.trim().split_once(' ')?;
    scheme.eq_ignore_ascii_case("bearer")
        .then(|| credentials.trim())
        .filter(|token| !token.is_empty())
}

fn bearer_token<'a>(req: &'a Request<'_>) -> Option<&'a str> {
    req.headers()
        .get_one("Authorization")
        .and_then(bearer_credentials)
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for CallerContext {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(token) = bearer_token(req) else {
            return Outcome::Success(CallerContext::anonymous());
        };

        let verified = req.rocket()
            .state::<AppState>()
            .and_then(|state| state.sessions.verify(token));

        match verified {
            Some(user_id) => Outcome::Success(CallerContext::user(user_id)),
            None => {
                debug!("Rejected bearer token, continuing as anonymous caller");
                Outcome::Success(CallerContext::anonymous())
            }
        }
    }
}
