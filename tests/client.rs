//! Tests for the HTTP answer service client against a local fake server

use std::time::{Duration, Instant};

use qna_validator::service::{Endpoint, QnaClient};
use qna_validator::{AnswerCandidate, AnswerService, Error};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve one HTTP response, returning the raw request that was received
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (base, handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).to_string()
}

fn client(hostname: String, delay: Duration) -> QnaClient {
    let endpoint = Endpoint {
        hostname,
        auth_key: "secret-key".to_string(),
        knowledge_base: "kb-1".to_string(),
    };
    QnaClient::new(endpoint, Duration::from_secs(5), delay).unwrap()
}

#[tokio::test]
async fn test_generate_answer_request_shape() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"answers":[{"answer":"X is Y","score":0.9,"id":1},{"answer":"Other","score":0.1}]}"#,
    )
    .await;

    let client = client(format!("{}/qnamaker/", base), Duration::ZERO);
    let answers = client.ask("What is X?").await.unwrap();

    assert_eq!(
        answers,
        vec![
            AnswerCandidate {
                answer: "X is Y".to_string(),
                score: 0.9
            },
            AnswerCandidate {
                answer: "Other".to_string(),
                score: 0.1
            },
        ]
    );

    let request = server.await.unwrap();
    assert!(
        request.starts_with("POST /qnamaker/knowledgebases/kb-1/generateAnswer HTTP/1.1\r\n"),
        "unexpected request line: {}",
        request.lines().next().unwrap_or_default()
    );
    assert!(request
        .to_lowercase()
        .contains("authorization: endpointkey secret-key"));
    assert!(request.to_lowercase().contains("content-type: application/json"));
    assert!(request.ends_with(r#"{"question":"What is X?"}"#));
}

#[tokio::test]
async fn test_empty_answers_list() {
    let (base, server) = serve_once("200 OK", r#"{"answers":[]}"#).await;

    let answers = client(base, Duration::ZERO).ask("anything").await.unwrap();

    assert!(answers.is_empty());
    server.await.unwrap();
}

#[tokio::test]
async fn test_delay_follows_each_call() {
    let (base, server) = serve_once("200 OK", r#"{"answers":[]}"#).await;

    let start = Instant::now();
    client(base, Duration::from_millis(200)).ask("q").await.unwrap();

    assert!(start.elapsed() >= Duration::from_millis(200));
    server.await.unwrap();
}

#[tokio::test]
async fn test_auth_failure_is_an_error() {
    let (base, server) = serve_once("401 Unauthorized", r#"{"error":"bad key"}"#).await;

    let err = client(base, Duration::ZERO).ask("q").await.unwrap_err();

    match err {
        Error::ServiceStatus { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("bad key"));
        }
        other => panic!("expected ServiceStatus, got {:?}", other),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_missing_answers_field_is_invalid_response() {
    let (base, server) = serve_once("200 OK", r#"{"result":"nope"}"#).await;

    let err = client(base, Duration::ZERO).ask("q").await.unwrap_err();

    assert!(matches!(err, Error::ServiceResponse(_)));
    server.await.unwrap();
}

#[tokio::test]
async fn test_unreachable_service_is_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client(base, Duration::ZERO).ask("q").await.unwrap_err();

    assert!(matches!(err, Error::ServiceRequest(_)));

    let rendered = err.render_chain();
    let mut lines = rendered.lines();
    assert_eq!(lines.next(), Some("Error: Request to answer service failed"));
    assert!(lines.all(|line| line.starts_with("  caused by: ")));
    assert_eq!(rendered.matches("error sending request").count(), 1, "{}", rendered);
}
