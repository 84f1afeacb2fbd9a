use std::cell::RefCell;
use std::io::Read;

use mautic::error::MauticError;
use mautic::{ApiRequest, ContactSearch, MauticApi, Method, OauthService};

/// Transport that hands back a canned body and records the request it saw.
struct CannedService {
    body: &'static str,
    seen: RefCell<Vec<ApiRequest>>,
}

impl CannedService {
    fn new(body: &'static str) -> Self {
        CannedService {
            body,
            seen: RefCell::new(Vec::new()),
        }
    }

    fn last_request(&self) -> ApiRequest {
        self.seen.borrow().last().expect("no request executed").clone()
    }
}

impl OauthService for CannedService {
    fn execute_request(&self, request: &ApiRequest) -> Result<Box<dyn Read>, MauticError> {
        self.seen.borrow_mut().push(request.clone());
        Ok(Box::new(self.body.as_bytes()))
    }
}

/// Transport that always fails, for error propagation tests.
struct FailingService;

impl OauthService for FailingService {
    fn execute_request(&self, _request: &ApiRequest) -> Result<Box<dyn Read>, MauticError> {
        Err(MauticError::Api {
            status: 401,
            message: "access denied".to_string(),
        })
    }
}

const EMPTY_LIST: &str = r#"{"total": 0, "leads": []}"#;

#[test]
fn list_contacts_hits_the_contacts_endpoint() {
    let api = MauticApi::new(CannedService::new(EMPTY_LIST));
    let result = api.list_contacts().expect("request should succeed");
    assert_eq!(result.total, 0);

    let request = api.service().last_request();
    assert_eq!(request.endpoint(), "/api/contacts");
    assert_eq!(request.method(), Method::Get);
    assert!(request.parameters().is_empty());
}

#[test]
fn search_options_become_query_parameters() {
    let api = MauticApi::new(CannedService::new(EMPTY_LIST));
    let search = ContactSearch {
        search: Some("email:*@example.com".to_string()),
        start: Some(20),
        limit: Some(10),
        order_by: Some("dateAdded".to_string()),
        order_by_dir: Some("DESC".to_string()),
        published_only: Some(true),
    };
    api.list_contacts_matching(&search).expect("request should succeed");

    let request = api.service().last_request();
    let parameters = request.parameters().to_vec();
    assert_eq!(
        parameters,
        vec![
            ("search".to_string(), "email:*@example.com".to_string()),
            ("start".to_string(), "20".to_string()),
            ("limit".to_string(), "10".to_string()),
            ("orderBy".to_string(), "dateAdded".to_string()),
            ("orderByDir".to_string(), "DESC".to_string()),
            ("publishedOnly".to_string(), "true".to_string()),
        ]
    );
}

#[test]
fn get_contact_embeds_the_id_in_the_path() {
    let api = MauticApi::new(CannedService::new(r#"{"lead": {"id": 435}}"#));
    let result = api.get_contact(435).expect("request should succeed");
    assert_eq!(result.contact.id, 435);
    assert_eq!(api.service().last_request().endpoint(), "/api/contacts/435");
}

#[test]
fn transport_errors_pass_through_unchanged() {
    let api = MauticApi::new(FailingService);
    match api.list_contacts() {
        Err(MauticError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "access denied");
        }
        other => panic!("expected an api error, got {:?}", other.map(|r| r.total)),
    }
}

#[test]
fn parse_failures_surface_as_parse_errors() {
    let api = MauticApi::new(CannedService::new(r#"{"total": 1, "leads": 42}"#));
    match api.list_contacts() {
        Err(MauticError::Parse(e)) => {
            assert!(e.message.contains("contacts"), "unexpected message: {}", e.message)
        }
        other => panic!("expected a parse error, got {:?}", other.map(|r| r.total)),
    }
}
