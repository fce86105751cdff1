// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use investec_openapi::{
	_preludet::*,
	api::{AccountId, BeneficiaryId, PaymentInstruction, TransferInstruction},
	error::ApiError,
};

const TOKEN_PATH: &str = "/identity/v2/oauth2/token";

fn server_url(server: &MockServer) -> Url {
	Url::parse(&server.base_url()).expect("Mock server URL should parse successfully.")
}

async fn mount_token_endpoint(server: &MockServer) -> httpmock::Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"token-1\",\"expires_in\":1800}");
		})
		.await
}

fn transfer() -> TransferInstruction {
	TransferInstruction {
		beneficiary_account_id: AccountId::new("B1")
			.expect("Beneficiary account fixture should be valid."),
		amount: "1.01".into(),
		my_reference: "x".into(),
		their_reference: "y".into(),
	}
}

#[tokio::test]
async fn transfer_multiple_posts_exact_body() {
	let server = MockServer::start_async().await;
	let _token = mount_token_endpoint(&server).await;
	let transfer_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/za/pb/v1/accounts/A1/transfermultiple")
				.header("authorization", "Bearer token-1")
				.header("content-type", "application/json")
				.json_body(json!({
					"TransferList": [{
						"beneficiaryAccountId": "B1",
						"amount": "1.01",
						"myReference": "x",
						"theirReference": "y",
					}],
				}));
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({"data": {"TransferResponses": []}}));
		})
		.await;
	let client = build_test_client(server_url(&server));
	let account = AccountId::new("A1").expect("Account fixture should be valid.");
	let payload = client
		.transfer_multiple(&account, &[transfer()])
		.await
		.expect("Transfer call should succeed.");

	assert_eq!(payload, json!({"TransferResponses": []}));

	transfer_mock.assert_async().await;
}

#[tokio::test]
async fn pay_multiple_posts_payment_list() {
	let server = MockServer::start_async().await;
	let _token = mount_token_endpoint(&server).await;
	let payment_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/za/pb/v1/accounts/A1/paymultiple")
				.header("content-type", "application/json")
				.json_body(json!({
					"paymentList": [{
						"beneficiaryId": "ben-1",
						"amount": "2.50",
						"myReference": "rent",
						"theirReference": "march",
					}],
				}));
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({"data": {"PaymentResponses": []}}));
		})
		.await;
	let client = build_test_client(server_url(&server));
	let account = AccountId::new("A1").expect("Account fixture should be valid.");
	let payment = PaymentInstruction {
		beneficiary_id: BeneficiaryId::new("ben-1").expect("Beneficiary fixture should be valid."),
		amount: "2.50".into(),
		my_reference: "rent".into(),
		their_reference: "march".into(),
	};

	client.pay_multiple(&account, &[payment]).await.expect("Payment call should succeed.");

	payment_mock.assert_async().await;
}

#[tokio::test]
async fn rejected_transfer_surfaces_api_error() {
	let server = MockServer::start_async().await;
	let _token = mount_token_endpoint(&server).await;
	let transfer_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/za/pb/v1/accounts/A1/transfermultiple");
			then.status(422)
				.header("content-type", "application/json")
				.body("{\"message\":\"insufficient funds\"}");
		})
		.await;
	let client = build_test_client(server_url(&server));
	let account = AccountId::new("A1").expect("Account fixture should be valid.");
	let err = client
		.transfer_multiple(&account, &[transfer()])
		.await
		.expect_err("Rejected transfers should surface to the caller.");

	match err {
		Error::Api(ApiError { status, body }) => {
			assert_eq!(status, 422);
			assert!(body.contains("insufficient funds"));
		},
		other => panic!("Expected an API error, got: {other:?}"),
	}

	transfer_mock.assert_async().await;
}
