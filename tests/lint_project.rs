//! Project evaluation against a mocked Jira.

use jiralint::report::{lint_project, LintScope};
use jiralint::{Credentials, JiraClient, JiraConfig, JiraService, ValidatorService, SEARCH_PATH};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_RESULT: &str = include_str!("fixtures/search-result.json");

fn service(server: &MockServer) -> JiraService<JiraClient> {
    let config = JiraConfig::new(server.uri(), Credentials::Bearer("test-token".to_string()));
    JiraService::new(JiraClient::new(&config).unwrap())
}

#[tokio::test]
async fn test_lint_first_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("maxResults", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SEARCH_RESULT, "application/json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let validators = ValidatorService::default();
    let report = lint_project(&service(&mock_server), &validators, "COV", LintScope::default())
        .await
        .unwrap();

    assert_eq!(report.project_key, "COV");
    assert_eq!(report.total, 202);
    assert_eq!(report.issues.len(), 2);

    let story = &report.issues[0];
    assert_eq!(story.key, "COV-202");
    assert_eq!(story.summary, "Show daily case numbers");
    assert!(story.result.is_valid, "{:?}", story.result);
    assert_eq!(story.result.messages, vec!["User Story - OK", "Acceptance Criteria - OK"]);

    let bug = &report.issues[1];
    assert_eq!(bug.key, "COV-201");
    assert!(!bug.result.is_valid);
    assert_eq!(bug.result.messages.len(), 2);
    assert_eq!(bug.result.messages[1], "No Acceptance Criteria");

    assert_eq!(report.passed(), 1);
    assert_eq!(report.failed(), 1);
    assert!(!report.is_valid());
}

#[tokio::test]
async fn test_lint_all_counts_fetched_issues() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "startAt": 0, "maxResults": 10, "total": 1,
        "issues": [{
            "id": "1",
            "key": "OPS-1",
            "fields": {
                "summary": "Rotate keys",
                "description": "As an operator, I want rotated keys so that leaks expire.\n\
                                Given a key older than 90 days when the job runs then it is rotated"
            }
        }]
    });

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("startAt", "0"))
        .and(query_param("maxResults", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let validators = ValidatorService::default();
    let scope = LintScope::All { page_size: 10 };
    let report = lint_project(&service(&mock_server), &validators, "OPS", scope)
        .await
        .unwrap();

    assert_eq!(report.total, 1);
    assert!(report.is_valid());
}

#[tokio::test]
async fn test_lint_propagates_search_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;

    let validators = ValidatorService::default();
    let err = lint_project(&service(&mock_server), &validators, "COV", LintScope::default())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Error while making a request to Jira. Response status code: '403'"
    );
}
