//! Absolute URLs for resources and parsing of client-supplied hyperlinks.

use actix_web::HttpRequest;
use mongodb::bson::oid::ObjectId;
use log::warn;
use url::Url;

use crate::constants::{
    API_PREFIX, CODE_BAD_REQUEST, ERR_INVALID_HOST, GROUPS_SEGMENT, USERS_SEGMENT,
};
use crate::errors::ApiError;

/// Builds absolute resource URLs against the host a request arrived on.
#[derive(Debug, Clone)]
pub struct Links {
    base: String,
}

impl Links {
    /// `base` is `scheme://host[:port]`; a trailing slash is ignored.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_request(req: &HttpRequest) -> Self {
        let info = req.connection_info();
        Self::new(format!("{}://{}", info.scheme(), info.host()))
    }

    pub fn users(&self) -> String {
        self.collection(USERS_SEGMENT)
    }

    pub fn user(&self, id: &ObjectId) -> String {
        self.detail(USERS_SEGMENT, id)
    }

    pub fn groups(&self) -> String {
        self.collection(GROUPS_SEGMENT)
    }

    pub fn group(&self, id: &ObjectId) -> String {
        self.detail(GROUPS_SEGMENT, id)
    }

    fn collection(&self, segment: &str) -> String {
        format!("{}{}/{}/", self.base, API_PREFIX, segment)
    }

    fn detail(&self, segment: &str, id: &ObjectId) -> String {
        format!("{}{}/{}/{}/", self.base, API_PREFIX, segment, id.to_hex())
    }
}

/// Full URL of the incoming request, including its query string.
///
/// A `Host` header that does not form a valid URL is the client's fault and
/// gives a 400.
pub fn request_url(req: &HttpRequest) -> Result<Url, ApiError> {
    let info = req.connection_info();
    Url::parse(&format!("{}://{}{}", info.scheme(), info.host(), req.uri())).map_err(|err| {
        warn!("Rejected host {:?}: {}", info.host(), err);
        ApiError::bad_request(CODE_BAD_REQUEST, ERR_INVALID_HOST)
    })
}

/// Extract the group id from a group hyperlink.
///
/// Accepts absolute URLs on any host as well as bare paths. Returns `None`
/// when the path is not a group detail route.
pub fn parse_group_link(link: &str) -> Option<ObjectId> {
    let path = match Url::parse(link) {
        Ok(url) => url.path().to_string(),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            link.split(['?', '#']).next().unwrap_or_default().to_string()
        }
        Err(_) => return None,
    };

    let prefix = format!("{}/{}/", API_PREFIX, GROUPS_SEGMENT);
    let rest = path.strip_prefix(&prefix)?;
    let id = rest.strip_suffix('/').unwrap_or(rest);
    ObjectId::parse_str(id).ok()
}
