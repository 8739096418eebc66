use std::time::Duration;

use futures::StreamExt;
use pioneer_primitives::types::{
	ApiKind,
	CorrelationId,
	TransactionStatus,
};
use serde_json::{
	json,
	Value,
};

use crate::{
	channel::channel,
	client::{
		ConnectionStatus,
		ProxyClient,
	},
	config::ProxyConfig,
	errors::ProxyError,
	messages::{
		ClientMessage,
		ErrorPayload,
		ResponseBody,
		WorkerMessage,
		WorkerResponse,
	},
	tests::factories::{
		inclusion_statuses,
		path,
		runtime_constants,
		spawn_proxy,
		test_config,
		MockChain,
		REJECTED_SIGNER,
	},
};

async fn ready_client() -> (ProxyClient, std::sync::Arc<MockChain>) {
	let chain = MockChain::new(false);
	let client = spawn_proxy(chain.clone(), test_config());
	client.init("ws://localhost:9944").expect("Init should be posted");
	let consts = client.wait_ready().await.expect("Worker should become ready");
	assert_eq!(consts, runtime_constants());
	(client, chain)
}

#[tokio::test]
async fn test_wait_ready_resolves_with_constants() {
	let (client, _chain) = ready_client().await;
	assert!(client.is_connected());
	assert_eq!(client.status(), ConnectionStatus::Connected);
}

#[tokio::test]
async fn test_wait_ready_fails_when_connection_fails() {
	let chain = MockChain::new(false);
	let client = spawn_proxy(chain, test_config());
	client.init("ws://unreachable").expect("Init should be posted");
	assert_eq!(client.wait_ready().await, Err(ProxyError::NotConnected));
}

#[tokio::test]
async fn test_out_of_order_responses_settle_their_own_calls() {
	let (client, _chain) = ready_client().await;

	let slow = client.query(path("bounty.bounties"), vec![json!(60), json!("slow")]);
	let fast = client.query(path("bounty.bounties"), vec![json!(0), json!("fast")]);
	let (slow, fast) = tokio::join!(slow, fast);

	assert_eq!(slow.expect("Slow call should succeed")["params"][1], json!("slow"));
	assert_eq!(fast.expect("Fast call should succeed")["params"][1], json!("fast"));
}

#[tokio::test]
async fn test_call_kinds_reach_the_chain() {
	let (client, _chain) = ready_client().await;

	let derived = client.derive(path("members.membership"), vec![]).await.expect("Derive works");
	assert_eq!(derived["kind"], json!("derive"));
	let rpc = client.rpc(path("system.health"), vec![]).await.expect("Rpc works");
	assert_eq!(rpc["kind"], json!("rpc"));
	assert_eq!(rpc["path"], json!("system.health"));
}

#[tokio::test]
async fn test_remote_failure_is_reported() {
	let (client, _chain) = ready_client().await;
	let result = client.query(path("bounty.fail"), vec![]).await;
	assert!(matches!(result, Err(ProxyError::RemoteCallFailed(_))));
}

#[tokio::test]
async fn test_call_before_init_fails_fast() {
	let chain = MockChain::new(false);
	let client = spawn_proxy(chain, test_config());
	let result = client.query(path("bounty.bounties"), vec![]).await;
	assert_eq!(result, Err(ProxyError::NotConnected));
}

#[tokio::test]
async fn test_disconnect_rejects_in_flight_calls() {
	let (client, chain) = ready_client().await;

	let in_flight = tokio::spawn({
		let client = client.clone();
		async move { client.query(path("bounty.bounties"), vec![json!(300)]).await }
	});
	tokio::time::sleep(Duration::from_millis(30)).await;
	chain.set_connected(false);

	let result = in_flight.await.expect("Task should not panic");
	assert_eq!(result, Err(ProxyError::NotConnected));
	assert_eq!(client.status(), ConnectionStatus::Disconnected);

	// New calls fail without a round trip until the worker reports back.
	let result = client.query(path("bounty.bounties"), vec![]).await;
	assert_eq!(result, Err(ProxyError::NotConnected));
}

#[tokio::test]
async fn test_subscription_streams_until_complete() {
	let (client, _chain) = ready_client().await;
	let updates = client
		.subscribe(ApiKind::Query, path("system.number"), vec![json!(1), json!(2), json!(3)])
		.expect("Subscription should be issued");
	let updates: Vec<Value> =
		updates.map(|update| update.expect("Update should be a value")).collect().await;
	assert_eq!(updates, vec![json!(1), json!(2), json!(3)]);
}

#[tokio::test]
async fn test_transaction_lifecycle() {
	let (client, _chain) = ready_client().await;
	let transaction = client
		.create_transaction(path("bounty.createBounty"), vec![json!({ "cherry": "100" })])
		.await
		.expect("Transaction should be created");
	assert_eq!(transaction.description()["method"], json!("bounty.createBounty"));

	let fee = transaction.payment_info("alice".to_owned()).await.expect("Fee should be known");
	assert_eq!(fee["partialFee"], json!("125"));

	let statuses: Vec<TransactionStatus> = transaction
		.sign_and_send("alice".to_owned())
		.expect("Submission should be issued")
		.map(|status| status.expect("Status should decode"))
		.collect()
		.await;
	assert_eq!(statuses, inclusion_statuses());

	// The worker forgets the transaction once it reached a terminal status.
	let mut resubmission =
		transaction.sign_and_send("alice".to_owned()).expect("Submission should be issued");
	assert!(matches!(resubmission.next().await, Some(Err(ProxyError::RemoteCallFailed(_)))));
	assert!(resubmission.next().await.is_none());
}

#[tokio::test]
async fn test_failed_submission_releases_transaction() {
	let (client, _chain) = ready_client().await;
	let transaction = client
		.create_transaction(path("bounty.createBounty"), vec![])
		.await
		.expect("Transaction should be created");

	let mut statuses =
		transaction.sign_and_send(REJECTED_SIGNER.to_owned()).expect("Submission should be issued");
	match statuses.next().await {
		Some(Err(ProxyError::RemoteCallFailed(reason))) => assert!(reason.contains("bad signature")),
		other => panic!("Expected a rejected submission, got {:?}", other),
	}
	assert!(statuses.next().await.is_none());

	let result = transaction.payment_info("alice".to_owned()).await;
	assert_eq!(result, Err(ProxyError::RemoteCallFailed("unknown transaction".to_owned())));
}

#[tokio::test]
async fn test_calls_on_one_transaction_are_serialized() {
	let chain = MockChain::new(false);
	let client = spawn_proxy(chain.clone(), test_config());
	client.init("ws://localhost:9944").expect("Init should be posted");
	client.wait_ready().await.expect("Worker should become ready");

	let transaction = client
		.create_transaction(path("bounty.createBounty"), vec![])
		.await
		.expect("Transaction should be created");
	let (first, second, third) = tokio::join!(
		transaction.payment_info("alice".to_owned()),
		transaction.payment_info("bob".to_owned()),
		transaction.payment_info("carol".to_owned()),
	);
	assert!(first.is_ok() && second.is_ok() && third.is_ok());
	assert_eq!(chain.concurrency.max.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_pending_call_timeout() {
	let chain = MockChain::new(false);
	let config = ProxyConfig {
		pending_call_timeout: Some(Duration::from_millis(50)),
		sweep_interval: Duration::from_millis(10),
	};
	let client = spawn_proxy(chain, config);
	client.init("ws://localhost:9944").expect("Init should be posted");
	client.wait_ready().await.expect("Worker should become ready");

	let result = client.query(path("bounty.bounties"), vec![json!(500)]).await;
	assert_eq!(result, Err(ProxyError::TimedOut));
}

#[tokio::test]
async fn test_duplicate_and_unknown_responses_are_ignored() {
	let (client_endpoint, mut worker_endpoint) = channel();
	let (client, mut service) = ProxyClient::new(client_endpoint, test_config());

	let mut call = Box::pin(client.query(path("bounty.bounties"), vec![]));
	assert!(futures::poll!(&mut call).is_pending());
	service.process_queued_commands();
	assert_eq!(service.pending_count(), 1);

	let id = match worker_endpoint.receiver.recv().await {
		Some(ClientMessage::Query(query)) => query.id,
		other => panic!("Unexpected message {:?}", other),
	};

	service.process_worker_message(WorkerMessage::Query(WorkerResponse::new(
		CorrelationId::new(),
		ResponseBody::Value(json!("stranger")),
	)));
	assert_eq!(service.pending_count(), 1);

	service.process_worker_message(WorkerMessage::Query(WorkerResponse::new(
		id,
		ResponseBody::Value(json!(7)),
	)));
	service.process_worker_message(WorkerMessage::Query(WorkerResponse::new(
		id,
		ResponseBody::Error(ErrorPayload::remote_call_failed("late")),
	)));
	assert_eq!(service.pending_count(), 0);
	assert_eq!(call.await, Ok(json!(7)));
}

#[tokio::test]
async fn test_abandoned_call_is_swept() {
	let (client_endpoint, _worker_endpoint) = channel();
	let (client, mut service) = ProxyClient::new(client_endpoint, test_config());

	let mut call = Box::pin(client.query(path("bounty.bounties"), vec![]));
	assert!(futures::poll!(&mut call).is_pending());
	service.process_queued_commands();
	assert_eq!(service.pending_count(), 1);

	drop(call);
	service.sweep();
	assert_eq!(service.pending_count(), 0);
}

#[tokio::test]
async fn test_connectivity_loss_rejects_everything() {
	let (client_endpoint, _worker_endpoint) = channel();
	let (client, mut service) = ProxyClient::new(client_endpoint, test_config());

	let mut call = Box::pin(client.query(path("bounty.bounties"), vec![]));
	let mut updates = client
		.subscribe(ApiKind::Query, path("system.number"), vec![])
		.expect("Subscription should be issued");
	assert!(futures::poll!(&mut call).is_pending());
	service.process_queued_commands();
	assert_eq!(service.pending_count(), 2);

	service.process_worker_message(WorkerMessage::IsConnected(false));
	assert_eq!(service.pending_count(), 0);
	assert_eq!(call.await, Err(ProxyError::NotConnected));
	assert_eq!(updates.next().await, Some(Err(ProxyError::NotConnected)));
	assert_eq!(updates.next().await, None);
	assert_eq!(client.status(), ConnectionStatus::Disconnected);
}

#[tokio::test]
async fn test_service_stop_rejects_calls() {
	let (client_endpoint, _worker_endpoint) = channel();
	let (client, service) = ProxyClient::new(client_endpoint, test_config());
	drop(service);
	assert_eq!(client.query(path("bounty.bounties"), vec![]).await, Err(ProxyError::ServiceStopped));
}
