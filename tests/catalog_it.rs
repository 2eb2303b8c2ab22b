// crates.io
use httpmock::{Mock, prelude::*};
use serde_json::json;
// self
use embed_token_broker::{
	auth::ServicePrincipal,
	error::Error,
	flows::Broker,
	http::ReqwestHttpClient,
	provider::ProviderEndpoints,
	url::Url,
};

const TOKEN_PATH: &str = "/tenant-test/oauth2/v2.0/token";

fn build_broker(server: &MockServer) -> Broker {
	let base = server.base_url();
	let authority = Url::parse(&base).expect("Mock authority base URL should parse.");
	let api =
		Url::parse(&format!("{base}/api")).expect("Mock API base URL should parse.");
	let principal = ServicePrincipal::new("tenant-test", "client-test", "secret-test")
		.expect("Test principal credentials should be valid.");

	Broker::with_http_client(
		principal,
		ProviderEndpoints::new(authority, api),
		ReqwestHttpClient::default(),
	)
}

async fn mount_identity(server: &MockServer) -> Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).header("content-type", "application/json").body(
				"{\"token_type\":\"Bearer\",\"expires_in\":3599,\"access_token\":\"identity-token\"}",
			);
		})
		.await
}

#[tokio::test]
async fn list_workspaces_returns_count_and_items() {
	let server = MockServer::start_async().await;
	let broker = build_broker(&server);
	let _identity = mount_identity(&server).await;
	let groups = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/groups").header("authorization", "Bearer identity-token");
			then.status(200).json_body(json!({
				"value": [
					{
						"id": "ws-1",
						"name": "Finance",
						"isReadOnly": false,
						"isOnDedicatedCapacity": true,
						"type": "Workspace",
					},
					{ "id": "ws-2", "name": "Marketing" },
				],
			}));
		})
		.await;
	let listing =
		broker.list_workspaces().await.expect("Workspace listing should succeed.");

	assert_eq!(listing.workspace_count, 2);
	assert_eq!(listing.workspaces[0].id, "ws-1");
	assert_eq!(listing.workspaces[0].name, "Finance");
	assert!(listing.workspaces[0].is_on_dedicated_capacity);
	assert_eq!(listing.workspaces[1].kind, "");

	groups.assert_async().await;
}

#[tokio::test]
async fn list_workspaces_maps_forbidden_to_permission_denied() {
	let server = MockServer::start_async().await;
	let broker = build_broker(&server);
	let _identity = mount_identity(&server).await;
	let _groups = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/groups");
			then.status(403).body("");
		})
		.await;
	let err = broker
		.list_workspaces()
		.await
		.expect_err("A forbidden listing should surface to the caller.");

	assert!(matches!(
		err,
		Error::PermissionDenied { permission: "Workspace.Read.All", status: 403 }
	));
}

#[tokio::test]
async fn list_reports_returns_count_and_items() {
	let server = MockServer::start_async().await;
	let broker = build_broker(&server);
	let _identity = mount_identity(&server).await;
	let reports = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/groups/ws-1/reports");
			then.status(200).json_body(json!({
				"value": [
					{
						"id": "report-1",
						"name": "Sales",
						"webUrl": "https://app.example.test/reports/report-1",
						"embedUrl": "https://app.example.test/reportEmbed?reportId=report-1",
						"datasetId": "dataset-1",
					},
				],
			}));
		})
		.await;
	let listing =
		broker.list_reports("ws-1").await.expect("Report listing should succeed.");

	assert_eq!(listing.workspace_id.as_ref(), "ws-1");
	assert_eq!(listing.report_count, 1);
	assert_eq!(listing.reports[0].id, "report-1");
	assert_eq!(listing.reports[0].dataset_id, "dataset-1");

	reports.assert_async().await;
}

#[tokio::test]
async fn list_reports_distinguishes_error_kinds() {
	for (status, expect_kind) in [(403_u16, "permission"), (404, "not_found"), (500, "upstream")] {
		let server = MockServer::start_async().await;
		let broker = build_broker(&server);
		let _identity = mount_identity(&server).await;
		let _reports = server
			.mock_async(move |when, then| {
				when.method(GET).path("/api/groups/ws-1/reports");
				then.status(status).body("{\"error\":\"boom\"}");
			})
			.await;
		let err = broker
			.list_reports("ws-1")
			.await
			.expect_err("Non-success listings should surface to the caller.");

		match (expect_kind, err) {
			("permission", Error::PermissionDenied { permission, status }) => {
				assert_eq!(permission, "Report.Read.All");
				assert_eq!(status, 403);
			},
			("not_found", Error::NotFound { resource, status }) => {
				assert!(resource.contains("ws-1"));
				assert_eq!(status, 404);
			},
			("upstream", Error::UpstreamApi { status, body }) => {
				assert_eq!(status, 500);
				assert!(body.contains("boom"));
			},
			(kind, other) => panic!("Expected a {kind} error, got {other:?}."),
		}
	}
}

#[tokio::test]
async fn list_reports_validates_the_workspace_identifier() {
	let server = MockServer::start_async().await;
	let broker = build_broker(&server);
	let identity = mount_identity(&server).await;
	let err = broker
		.list_reports("")
		.await
		.expect_err("An empty workspace identifier must be rejected.");

	assert!(matches!(err, Error::Validation(_)));

	identity.assert_calls_async(0).await;
}
