//! Endpoint wrappers over an injectable, pre-authenticated transport.
//!
//! The transport boundary is the [`OauthService`] trait: given an endpoint
//! path and parameters, produce the raw response body or fail. Anything that
//! can sign and execute a request can back [`MauticApi`], including canned
//! byte streams in tests.

use std::io::Read;

use tracing::debug;

use crate::error::MauticError;
use crate::parse;
use crate::types::{GetContactResult, ListContactsResult};

/// HTTP method of an [`ApiRequest`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Post,
}

/// Describes one API request: method, endpoint path, and ordered parameters
/// (query parameters for GET, form fields for POST).
#[derive(Clone, Debug, Default)]
pub struct ApiRequest {
    method: Method,
    endpoint: String,
    parameters: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(endpoint: impl Into<String>) -> Self {
        ApiRequest {
            method: Method::Get,
            endpoint: endpoint.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn add_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parameters.push((name.into(), value.into()));
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }
}

/// Authenticated transport capability.
///
/// Implementations sign the request with whatever credentials they hold,
/// execute it, and return a reader over the response body. Errors may occur
/// at any level: connection failures, rejected credentials, API errors.
pub trait OauthService {
    fn execute_request(&self, request: &ApiRequest) -> Result<Box<dyn Read>, MauticError>;
}

/// Search options for the contact list endpoint. All fields are optional;
/// the default sends no parameters.
#[derive(Clone, Debug, Default)]
pub struct ContactSearch {
    pub search: Option<String>,
    pub start: Option<u32>,
    pub limit: Option<u32>,
    pub order_by: Option<String>,
    pub order_by_dir: Option<String>,
    pub published_only: Option<bool>,
}

/// The Mautic REST API endpoints as plain methods.
///
/// Requires an [`OauthService`] implementation to authenticate and execute
/// requests; responses go through the normalization and mapping pipeline in
/// [`crate::parse`].
pub struct MauticApi<S> {
    service: S,
}

impl<S: OauthService> MauticApi<S> {
    pub fn new(service: S) -> Self {
        MauticApi { service }
    }

    /// The transport backing this API instance.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// `GET /api/contacts` with no search options.
    pub fn list_contacts(&self) -> Result<ListContactsResult, MauticError> {
        self.list_contacts_matching(&ContactSearch::default())
    }

    /// `GET /api/contacts` with the given search options.
    pub fn list_contacts_matching(
        &self,
        search: &ContactSearch,
    ) -> Result<ListContactsResult, MauticError> {
        let mut request = ApiRequest::new("/api/contacts");
        if let Some(search) = &search.search {
            request.add_parameter("search", search.as_str());
        }
        if let Some(start) = search.start {
            request.add_parameter("start", start.to_string());
        }
        if let Some(limit) = search.limit {
            request.add_parameter("limit", limit.to_string());
        }
        if let Some(order_by) = &search.order_by {
            request.add_parameter("orderBy", order_by.as_str());
        }
        if let Some(order_by_dir) = &search.order_by_dir {
            request.add_parameter("orderByDir", order_by_dir.as_str());
        }
        if let Some(published_only) = search.published_only {
            request.add_parameter("publishedOnly", published_only.to_string());
        }

        debug!(endpoint = request.endpoint(), "listing contacts");
        let body = self.service.execute_request(&request)?;
        Ok(parse::parse_list_contacts(body)?)
    }

    /// `GET /api/contacts/{id}`.
    pub fn get_contact(&self, contact_id: i64) -> Result<GetContactResult, MauticError> {
        let request = ApiRequest::new(format!("/api/contacts/{}", contact_id));
        debug!(endpoint = request.endpoint(), "fetching contact");
        let body = self.service.execute_request(&request)?;
        Ok(parse::parse_get_contact(body)?)
    }
}
