use recruitment_workbench::config::Config;
use recruitment_workbench::error::Error;
use recruitment_workbench::models::workbook::{Workbook, WorkbookStatus};
use recruitment_workbench::services::chat_session::SEND_FAILURE_MESSAGE;
use recruitment_workbench::services::lifecycle::LifecycleState;
use recruitment_workbench::Workbench;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

fn workbench_at(base_url: &str) -> Workbench {
    let config = Config {
        api_base_url: base_url.to_string(),
        request_timeout_secs: 2,
        list_stale_secs: 300,
        prospects_stale_secs: 60,
        analytics_stale_secs: 1800,
        analytics_refresh_secs: 1800,
    };
    Workbench::new(&config).expect("workbench")
}

// Nothing listens on port 9; transport errors come back immediately. Tests
// that must not issue a network call assert a Validation error instead.
fn unreachable_workbench() -> Workbench {
    workbench_at("http://127.0.0.1:9")
}

// One-shot backend stub: serves the canned JSON bodies in order, one
// connection per request, then exits.
async fn stub_backend(bodies: Vec<String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        for body in bodies {
            let (mut socket, _) = listener.accept().await.expect("accept");
            read_http_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.expect("write");
        }
    });
    format!("http://{}", addr)
}

// Drain the request fully (headers plus content-length body) before
// answering, so the client never sees a reset mid-write.
async fn read_http_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.expect("read");
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let body_len = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                return;
            }
        }
    }
}

fn workbook(status: WorkbookStatus) -> Workbook {
    Workbook {
        id: "wb-test".to_string(),
        vaga_id: 42,
        created_by: Some("recruiter@example.com".to_string()),
        created_at: None,
        closed_at: None,
        status: Some(status),
        vaga_title: None,
        total_prospects: None,
    }
}

#[tokio::test]
async fn closing_with_zero_selections_is_rejected_without_network() {
    let workbench = unreachable_workbench();
    let mut session = workbench.open_session(workbook(WorkbookStatus::Open));

    let err = session.close().await.unwrap_err();
    assert!(
        matches!(err, Error::Validation(_)),
        "expected local rejection, got {:?}",
        err
    );
    assert_eq!(session.state(), LifecycleState::Open);
    assert!(session.workbook().closed_at.is_none());
}

#[tokio::test]
async fn close_failure_leaves_lifecycle_state_unchanged() {
    let workbench = unreachable_workbench();
    let mut session = workbench.open_session(workbook(WorkbookStatus::Open));
    session.set_selected(1, true);

    let err = session.close().await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(session.state(), LifecycleState::Open);
    assert!(session.workbook().closed_at.is_none());
}

#[tokio::test]
async fn closing_sets_closed_state_and_timestamp() {
    let base_url = stub_backend(vec![
        r#"{"id":"wb-test","vaga_id":42,"criado_por":"recruiter@example.com","criado_em":null,"fechado_em":"2026-08-27T12:00:00Z","status":"fechado","vaga_titulo":null,"total_prospects":1}"#.to_string(),
    ])
    .await;
    let workbench = workbench_at(&base_url);
    let mut session = workbench.open_session(workbook(WorkbookStatus::Open));
    session.set_selected(1, true);

    session.close().await.expect("close");

    assert_eq!(session.state(), LifecycleState::Closed);
    assert!(session.is_closed());
    assert!(session.workbook().closed_at.is_some());
    assert_eq!(session.workbook().status, Some(WorkbookStatus::Closed));
}

#[tokio::test]
async fn reopening_clears_the_close_timestamp() {
    // The update response echoes a stale fechado_em; the reload that
    // follows finds no persisted prospects.
    let base_url = stub_backend(vec![
        r#"{"id":"wb-test","vaga_id":42,"criado_por":null,"criado_em":null,"fechado_em":"2026-08-20T09:00:00Z","status":"aberto","vaga_titulo":null,"total_prospects":0}"#.to_string(),
        "[]".to_string(),
    ])
    .await;
    let workbench = workbench_at(&base_url);
    let mut session = workbench.open_session(workbook(WorkbookStatus::Closed));

    session.reopen().await.expect("reopen");

    assert_eq!(session.state(), LifecycleState::Open);
    assert_eq!(session.workbook().status, Some(WorkbookStatus::Open));
    assert!(session.workbook().closed_at.is_none());
    assert_eq!(session.reconciler().candidates().len(), 0);
}

#[tokio::test]
async fn reopen_is_rejected_on_an_open_workbook() {
    let workbench = unreachable_workbench();
    let mut session = workbench.open_session(workbook(WorkbookStatus::Open));

    let err = session.reopen().await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn reopen_failure_keeps_the_workbook_closed() {
    let workbench = unreachable_workbench();
    let mut session = workbench.open_session(workbook(WorkbookStatus::Closed));

    let err = session.reopen().await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(session.state(), LifecycleState::Closed);
}

#[tokio::test]
async fn toggling_selection_on_a_closed_workbook_has_no_effect() {
    let workbench = unreachable_workbench();
    let mut session = workbench.open_session(workbook(WorkbookStatus::Closed));

    assert!(!session.set_selected(7, true));
    assert_eq!(session.reconciler().selected_count(), 0);
}

#[tokio::test]
async fn in_progress_workbooks_gate_as_open() {
    let workbench = unreachable_workbench();
    let mut session = workbench.open_session(workbook(WorkbookStatus::InProgress));

    assert!(!session.is_closed());
    assert!(session.set_selected(7, true));
    assert_eq!(session.reconciler().selected_count(), 1);
}

#[tokio::test]
async fn saving_on_a_closed_workbook_is_rejected() {
    let workbench = unreachable_workbench();
    let mut session = workbench.open_session(workbook(WorkbookStatus::Closed));

    let err = session.save_selection().await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn save_failure_leaves_local_selection_untouched() {
    let workbench = unreachable_workbench();
    let mut session = workbench.open_session(workbook(WorkbookStatus::Open));
    session.set_selected(1, true);
    session.set_selected(2, true);

    let err = session.save_selection().await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(session.reconciler().selected_count(), 2);
    assert!(session.reconciler().is_selected(1));
    assert!(session.reconciler().is_selected(2));
}

#[tokio::test]
async fn chat_failure_degrades_to_the_apology_message() {
    let workbench = unreachable_workbench();
    let mut session = workbench.open_session(workbook(WorkbookStatus::Open));

    session.send_message("engenheiros de dados").await.unwrap();

    let messages = session.chat().messages();
    // Greeting, user turn, apology.
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].content, "engenheiros de dados");
    assert_eq!(messages[2].content, SEND_FAILURE_MESSAGE);
    assert!(!session.chat().is_pending());
}

#[tokio::test]
async fn chat_is_rejected_on_a_closed_workbook() {
    let workbench = unreachable_workbench();
    let mut session = workbench.open_session(workbook(WorkbookStatus::Closed));

    let err = session.send_message("busca").await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    // The rejected turn never reaches the transcript.
    assert_eq!(session.chat().messages().len(), 1);
}
