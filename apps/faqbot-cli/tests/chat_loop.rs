use std::io::Cursor;

use faqbot_cli::chat::{run_chat, write_exit_notice};
use faqbot_core::config::{ChatSettings, Settings, DEFAULT_FALLBACK_MESSAGE};
use faqbot_core::corpus::StaticCorpus;
use faqbot_core::traits::Responder;
use faqbot_service::FaqService;

struct Echo;

impl Responder for Echo {
    fn answer(&self, query: &str) -> String {
        format!("<{query}>")
    }
}

fn transcript<R: Responder>(responder: &R, input: &[u8]) -> (usize, String) {
    let mut out = Vec::new();
    let turns = run_chat(responder, &ChatSettings::default(), Cursor::new(input.to_vec()), &mut out).expect("chat");
    (turns, String::from_utf8(out).expect("utf8"))
}

#[test]
fn exit_is_case_insensitive_and_stops_the_loop() {
    let (turns, out) = transcript(&Echo, b"hello\nEXIT\nnever asked\n");
    assert_eq!(turns, 1);
    assert!(out.contains("Bot: <hello>\n"));
    assert!(!out.contains("never asked"));
    assert!(out.ends_with("Goodbye!\n"));
}

#[test]
fn end_of_input_ends_the_session() {
    let (turns, out) = transcript(&Echo, b"first\r\nsecond");
    assert_eq!(turns, 2);
    assert!(out.contains("Bot: <first>\n"));
    assert!(out.contains("Bot: <second>\n"));
    assert!(out.ends_with("Exiting...\n"));
}

#[test]
fn empty_lines_and_invalid_utf8_are_still_answered() {
    let (turns, out) = transcript(&Echo, b"\n\xff\xfe\nexit\n");
    assert_eq!(turns, 2);
    assert!(out.contains("Bot: <>\n"));
    assert!(out.contains("Bot: <\u{fffd}\u{fffd}>\n"));
}

#[test]
fn service_answers_through_the_loop() {
    let service = FaqService::from_supplier(&StaticCorpus::default(), &Settings::default());
    let (turns, out) = transcript(&service, b"How many glasses of water per day?\nasdkjhasdkjh\n\nexit\n");
    assert_eq!(turns, 3);
    assert!(out.contains("Bot: Adults should drink 8-10 glasses (2-3 liters) of water daily.\n"));
    assert_eq!(out.matches(DEFAULT_FALLBACK_MESSAGE).count(), 2);
}

#[test]
fn padded_exit_is_forwarded_as_a_question() {
    let (turns, out) = transcript(&Echo, b"  exit  \nExit\n");
    assert_eq!(turns, 1);
    assert!(out.contains("Bot: <  exit  >\n"));
    assert!(out.ends_with("Goodbye!\n"));
}

#[test]
fn exit_notice_matches_end_of_input_message() {
    let mut notice = Vec::new();
    write_exit_notice(&mut notice).expect("notice");
    assert_eq!(notice, b"\nExiting...\n");

    let (_, out) = transcript(&Echo, b"");
    assert_eq!(out, "You: \nExiting...\n");
}
