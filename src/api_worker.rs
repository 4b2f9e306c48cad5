use crate::api::ApiClient;
use crate::logger;
use crate::models::{ApiRequest, ApiResponse};
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

/// Spawn the background thread that owns the HTTP client and its tokio
/// runtime. Requests arrive over `api_rx`; every outcome, success or
/// failure, goes back over `api_tx`. The thread exits when the request
/// channel disconnects.
pub fn spawn_api_worker(
    api_tx: Sender<ApiResponse>,
    api_rx: Receiver<ApiRequest>,
) -> thread::JoinHandle<()> {
    spawn_api_worker_with_client(ApiClient::new(), api_tx, api_rx)
}

pub fn spawn_api_worker_with_client(
    mut client: ApiClient,
    api_tx: Sender<ApiResponse>,
    api_rx: Receiver<ApiRequest>,
) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("classfi::api_worker".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    logger::log(&format!("Failed to start worker runtime: {}", e));
                    return;
                }
            };

            loop {
                match api_rx.recv() {
                    Ok(request) => handle_request(&rt, &mut client, &api_tx, request),
                    Err(_) => {
                        logger::log("Worker channel disconnected, exiting");
                        break;
                    }
                }
            }
        })
        .expect("Failed to spawn API worker thread")
}

fn handle_request(
    rt: &tokio::runtime::Runtime,
    client: &mut ApiClient,
    api_tx: &Sender<ApiResponse>,
    request: ApiRequest,
) {
    let response = match request {
        ApiRequest::UseToken(token) => {
            client.set_token(Some(token));
            return;
        }
        ApiRequest::ClearToken => {
            client.set_token(None);
            return;
        }
        ApiRequest::Login { email, password } => {
            logger::log(&format!("Worker: login for {}", email));
            rt.block_on(client.login(&email, &password))
                .map(|r| ApiResponse::LoggedIn(Box::new(r)))
        }
        ApiRequest::Signup(payload) => {
            logger::log("Worker: signup");
            rt.block_on(client.signup(&payload)).map(ApiResponse::SignedUp)
        }
        ApiRequest::GetSubjects => rt.block_on(client.get_subjects()).map(ApiResponse::Subjects),
        ApiRequest::GetTopics { subject_id } => rt
            .block_on(client.get_topics(subject_id))
            .map(ApiResponse::Topics),
        ApiRequest::GetSubtopics { topic_id } => rt
            .block_on(client.get_subtopics(topic_id))
            .map(ApiResponse::Subtopics),
        ApiRequest::GetCards(filter) => rt.block_on(client.get_cards(filter)).map(ApiResponse::Cards),
    };

    let message = match response {
        Ok(response) => response,
        Err(e) => {
            logger::log(&format!("Worker request failed: {}", e));
            ApiResponse::Error(e)
        }
    };
    let _ = api_tx.send(message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_worker_exits_on_channel_disconnect() {
        let (resp_tx, _resp_rx) = mpsc::channel();
        let (req_tx, req_rx) = mpsc::channel::<ApiRequest>();
        let handle = spawn_api_worker(resp_tx, req_rx);
        drop(req_tx);
        handle.join().unwrap();
    }

    #[test]
    fn test_worker_answers_requests_against_mock_server() {
        // The worker thread drives its own runtime, so the mock server is
        // set up from a scratch runtime here rather than #[tokio::test].
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut server = rt.block_on(mockito::Server::new_async());
        rt.block_on(
            server
                .mock("GET", "/education/subjects/")
                .with_status(200)
                .with_body(r#"{"count": 0, "next": null, "previous": null, "results": []}"#)
                .create_async(),
        );

        let client = ApiClient::with_base_url(&server.url());
        let (resp_tx, resp_rx) = mpsc::channel();
        let (req_tx, req_rx) = mpsc::channel();
        let handle = spawn_api_worker_with_client(client, resp_tx, req_rx);

        req_tx.send(ApiRequest::GetSubjects).unwrap();
        match resp_rx.recv().unwrap() {
            ApiResponse::Subjects(page) => assert_eq!(page.count, 0),
            other => panic!("unexpected response: {:?}", other),
        }

        drop(req_tx);
        handle.join().unwrap();
    }
}
