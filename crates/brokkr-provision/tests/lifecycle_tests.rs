//! Lifecycle workflows against a mocked provider: create-from-template
//! (including the README revision-marker merge and the no-rollback
//! contract), patch diffing, and the delete cascade ordering.

mod common;

use brokkr_core::error::{Error, ErrorKind};
use brokkr_github::RepoPatch;
use brokkr_portfolio::PortfolioStore;
use brokkr_provision::CreateFromTemplate;
use common::*;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn create_request(template: &str) -> CreateFromTemplate {
    CreateFromTemplate {
        name: "demo-app".into(),
        description: "test".into(),
        template_id: template.into(),
        private: false,
    }
}

#[tokio::test]
async fn create_from_basic_template_populates_repo() {
    let stack = stack().await;

    Mock::given(method("POST"))
        .and(path("/user/repos"))
        .and(body_partial_json(json!({
            "name": "demo-app",
            "auto_init": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(repo_json("demo-app")))
        .expect(1)
        .mount(&stack.server)
        .await;

    // auto_init created a README; its sha must ride along on the rewrite
    Mock::given(method("GET"))
        .and(path("/repos/thisisrober/demo-app/contents/README.md"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": "IyBkZW1vLWFwcA==",
            "sha": "autoinit-sha"
        })))
        .mount(&stack.server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/repos/thisisrober/demo-app/contents/README.md"))
        .and(body_partial_json(json!({ "sha": "autoinit-sha" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "commit": {} })))
        .expect(1)
        .mount(&stack.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/repos/thisisrober/demo-app/contents/LICENSE"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "commit": {} })))
        .expect(1)
        .mount(&stack.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/repos/thisisrober/demo-app/contents/.gitignore"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "commit": {} })))
        .expect(1)
        .mount(&stack.server)
        .await;

    let created = stack
        .service
        .create_from_template(create_request("basic"))
        .await
        .unwrap();

    assert_eq!(created.name, "demo-app");
    assert_eq!(created.html_url, "https://github.com/thisisrober/demo-app");
    assert_eq!(
        created.files_written,
        vec!["LICENSE", "README.md", ".gitignore"]
    );
}

#[tokio::test]
async fn create_rejects_missing_name_before_any_call() {
    let stack = stack().await;

    let mut request = create_request("basic");
    request.name = "  ".into();
    let err = stack.service.create_from_template(request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(stack.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_rejects_unknown_template_before_any_call() {
    let stack = stack().await;

    let err = stack
        .service
        .create_from_template(create_request("no-such-template"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(stack.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_name_collision_is_conflict() {
    let stack = stack().await;

    Mock::given(method("POST"))
        .and(path("/user/repos"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({ "message": "name already exists on this account" })),
        )
        .mount(&stack.server)
        .await;

    let err = stack
        .service
        .create_from_template(create_request("basic"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn failed_file_write_is_partial_failure_without_rollback() {
    let stack = stack().await;

    Mock::given(method("POST"))
        .and(path("/user/repos"))
        .respond_with(ResponseTemplate::new(201).set_body_json(repo_json("demo-app")))
        .mount(&stack.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/thisisrober/demo-app/contents/README.md"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&stack.server)
        .await;

    // LICENSE lands, README write blows up, .gitignore is never attempted
    Mock::given(method("PUT"))
        .and(path("/repos/thisisrober/demo-app/contents/LICENSE"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "commit": {} })))
        .expect(1)
        .mount(&stack.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/repos/thisisrober/demo-app/contents/README.md"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&stack.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/repos/thisisrober/demo-app/contents/.gitignore"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&stack.server)
        .await;

    let err = stack
        .service
        .create_from_template(create_request("basic"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::PartialFailure);
    // The report enumerates what did complete; no DELETE was issued
    match err {
        Error::PartialFailure { completed, .. } => {
            assert_eq!(completed, vec!["LICENSE".to_string()]);
        }
        other => panic!("expected PartialFailure, got {:?}", other),
    }
    let deletes: Vec<_> = stack
        .server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.as_str() == "DELETE")
        .collect();
    assert!(deletes.is_empty());
}

#[tokio::test]
async fn noop_patch_short_circuits_without_provider_call() {
    let stack = stack().await;

    Mock::given(method("GET"))
        .and(path("/repos/thisisrober/demo-app"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo_json("demo-app")))
        .mount(&stack.server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/repos/thisisrober/demo-app"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&stack.server)
        .await;

    // Every requested value matches the live repository
    let outcome = stack
        .service
        .update_repository(
            "thisisrober",
            "demo-app",
            RepoPatch {
                name: Some("demo-app".into()),
                description: Some("A test repository".into()),
                private: Some(false),
            },
        )
        .await
        .unwrap();

    assert!(matches!(outcome, brokkr_provision::UpdateOutcome::NoChange));
}

#[tokio::test]
async fn patch_sends_only_differing_fields() {
    let stack = stack().await;

    Mock::given(method("GET"))
        .and(path("/repos/thisisrober/demo-app"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo_json("demo-app")))
        .mount(&stack.server)
        .await;
    // Exact body: the unchanged name and visibility are not sent
    Mock::given(method("PATCH"))
        .and(path("/repos/thisisrober/demo-app"))
        .and(body_json(json!({ "description": "fresh description" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo_json("demo-app")))
        .expect(1)
        .mount(&stack.server)
        .await;

    let outcome = stack
        .service
        .update_repository(
            "thisisrober",
            "demo-app",
            RepoPatch {
                name: Some("demo-app".into()),
                description: Some("fresh description".into()),
                private: Some(false),
            },
        )
        .await
        .unwrap();

    assert!(matches!(outcome, brokkr_provision::UpdateOutcome::Updated(_)));
}

#[tokio::test]
async fn delete_cascades_to_deployment_and_portfolio() {
    let stack = stack().await;

    Mock::given(method("DELETE"))
        .and(path("/repos/thisisrober/demo-app"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&stack.server)
        .await;

    // Local state on both legs
    std::fs::create_dir_all(stack.projects_path().join("demo-app")).unwrap();
    seed_portfolio(&stack.portfolio, "demo-app");

    let report = stack
        .service
        .delete_repository("thisisrober", "demo-app")
        .await
        .unwrap();

    assert_eq!(report.deleted, "thisisrober/demo-app");
    assert!(report.warnings.is_empty());
    assert!(!stack.projects_path().join("demo-app").exists());
    assert!(stack.portfolio.find_by_repo_name("demo-app").unwrap().is_none());
}

#[tokio::test]
async fn failed_provider_delete_leaves_local_state_untouched() {
    let stack = stack().await;

    Mock::given(method("DELETE"))
        .and(path("/repos/thisisrober/demo-app"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .mount(&stack.server)
        .await;

    std::fs::create_dir_all(stack.projects_path().join("demo-app")).unwrap();
    let entry_id = seed_portfolio(&stack.portfolio, "demo-app");

    let err = stack
        .service
        .delete_repository("thisisrober", "demo-app")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unexpected);

    // Nothing local was torn down while the remote object still exists
    assert!(stack.projects_path().join("demo-app").exists());
    assert_eq!(
        stack
            .portfolio
            .find_by_repo_name("demo-app")
            .unwrap()
            .unwrap()
            .id,
        entry_id
    );
}
