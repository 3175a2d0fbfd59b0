//! Rendering the app into a test backend.

mod common;

use bytes::Bytes;
use chatdeck::adapters::MockResponse;
use chatdeck::models::{MessageRecord, ASSISTANT_CONTACT_ID};
use chatdeck::ui;
use common::{mock_app, pump_one, send, settle, sse_body, sse_chunk};
use ratatui::{backend::TestBackend, Terminal};

fn draw(app: &chatdeck::app::App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| ui::render(f, app)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[tokio::test]
async fn test_initial_screen_shows_contacts_and_greeting() {
    let (app, _mock) = mock_app(MockResponse::chunks([sse_body(&[])]));

    let screen = draw(&app, 120, 30);

    assert!(screen.contains("AI Assistant"));
    assert!(screen.contains("Zhang San"));
    assert!(screen.contains("Li Si"));
    assert!(screen.contains("How can I help you?"));
    assert!(screen.contains("Enter send"));
}

#[tokio::test]
async fn test_streaming_reply_shows_partial_text_and_cursor() {
    let (mut app, _mock) = mock_app(MockResponse::StreamThenHang(vec![Bytes::from(
        sse_chunk("Hel"),
    )]));

    send(&mut app, "hi");
    pump_one(&mut app).await;

    let screen = draw(&app, 120, 30);
    assert!(screen.contains("Hel▌"));
    assert!(screen.contains("Esc stop generating"));
}

#[tokio::test]
async fn test_failed_reply_shows_notice() {
    let (mut app, _mock) = mock_app(MockResponse::Error(chatdeck::traits::HttpError::Timeout(
        "30s".to_string(),
    )));

    send(&mut app, "hi");
    settle(&mut app).await;

    let screen = draw(&app, 120, 30);
    assert!(screen.contains("Sorry, the message failed to send"));
}

#[tokio::test]
async fn test_narrow_terminal_hides_contacts() {
    let (app, _mock) = mock_app(MockResponse::chunks([sse_body(&[])]));

    let screen = draw(&app, 40, 20);

    assert!(!screen.contains("Zhang San"));
    assert!(screen.contains("Message"));
}

#[tokio::test]
async fn test_busy_notice_is_rendered() {
    let (mut app, _mock) = mock_app(MockResponse::StreamThenHang(vec![]));

    send(&mut app, "first");
    send(&mut app, "second");

    let screen = draw(&app, 120, 30);
    assert!(screen.contains("Still answering"));
}

#[test]
fn test_long_conversation_stays_pinned_to_bottom() {
    let (mut app, _mock) = mock_app(MockResponse::chunks([sse_body(&[])]));
    let text = (0..70_000)
        .map(|i| format!("line{}", i))
        .collect::<Vec<_>>()
        .join("\n");
    let id = app.store.next_id();
    app.store.append(MessageRecord::own(id, ASSISTANT_CONTACT_ID, text));

    let screen = draw(&app, 80, 20);

    assert!(screen.contains("line69999"));
    assert!(screen.contains("line69995"));
    assert!(!screen.contains("line4450"));
}
