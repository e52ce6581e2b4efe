//! Tests for input routing and history.

use super::*;

fn router(policy: EmptyInputPolicy) -> InputRouter {
    InputRouter::new('/', policy, 10)
}

#[test]
fn marker_prefix_routes_to_command() {
    assert_eq!(
        InputRouter::default().route("/kick bob"),
        Some(ConsoleInput::Command("kick bob".to_string()))
    );
}

#[test]
fn plain_text_routes_to_message() {
    assert_eq!(
        InputRouter::default().route("hello"),
        Some(ConsoleInput::Message("hello".to_string()))
    );
}

#[test]
fn marker_elsewhere_is_a_message() {
    assert_eq!(
        InputRouter::default().route("see /help"),
        Some(ConsoleInput::Message("see /help".to_string()))
    );
}

#[test]
fn text_is_not_trimmed() {
    assert_eq!(
        InputRouter::default().route("/say  hi "),
        Some(ConsoleInput::Command("say  hi ".to_string()))
    );
}

#[test]
fn custom_marker() {
    let router = InputRouter::new('!', EmptyInputPolicy::Drop, 10);
    assert_eq!(
        router.route("!list"),
        Some(ConsoleInput::Command("list".to_string()))
    );
    assert_eq!(
        router.route("/list"),
        Some(ConsoleInput::Message("/list".to_string()))
    );
}

#[test]
fn drop_policy_sends_nothing_for_empty_input() {
    let router = router(EmptyInputPolicy::Drop);
    assert_eq!(router.route(""), None);
    assert_eq!(router.route("   "), None);
    assert_eq!(router.route("/"), None);
    assert_eq!(router.route("/  "), None);
}

#[test]
fn send_policy_sends_empty_message() {
    let router = router(EmptyInputPolicy::SendEmptyMessage);
    assert_eq!(router.route(""), Some(ConsoleInput::Message(String::new())));
    assert_eq!(router.route("  "), Some(ConsoleInput::Message("  ".to_string())));
    assert_eq!(router.route("/"), Some(ConsoleInput::Command(String::new())));
}

#[test]
fn submit_sends_and_records() {
    let mut router = router(EmptyInputPolicy::Drop);
    let mut sent: Vec<ConsoleInput> = Vec::new();

    let routed = router.submit("/kick bob", &mut sent);

    assert_eq!(routed, Some(ConsoleInput::Command("kick bob".to_string())));
    assert_eq!(sent, vec![ConsoleInput::Command("kick bob".to_string())]);
    assert_eq!(router.history().entries().len(), 1);
    assert_eq!(router.history().entries()[0], "/kick bob");
}

#[test]
fn submit_of_empty_input_sends_nothing() {
    let mut router = router(EmptyInputPolicy::Drop);
    let mut sent: Vec<ConsoleInput> = Vec::new();

    assert_eq!(router.submit("", &mut sent), None);
    assert!(sent.is_empty());
    assert!(router.history().entries().is_empty());
}

#[test]
fn submit_of_empty_input_with_send_policy() {
    let mut router = router(EmptyInputPolicy::SendEmptyMessage);
    let mut sent: Vec<ConsoleInput> = Vec::new();

    router.submit("", &mut sent);
    assert_eq!(sent, vec![ConsoleInput::Message(String::new())]);
}

#[test]
fn history_recalls_newest_first_and_restores_draft() {
    let mut history = InputHistory::new(10);
    history.record("one");
    history.record("two");

    assert_eq!(history.previous("draft"), Some("two"));
    assert_eq!(history.previous("ignored"), Some("one"));
    assert_eq!(history.previous("ignored"), None);
    assert_eq!(history.next(), Some("two"));
    assert_eq!(history.next(), Some("draft"));
    assert!(!history.is_navigating());
    assert_eq!(history.next(), None);
}

#[test]
fn history_on_empty_is_none() {
    let mut history = InputHistory::new(10);
    assert_eq!(history.previous("x"), None);
    assert_eq!(history.next(), None);
}

#[test]
fn history_skips_consecutive_duplicates() {
    let mut history = InputHistory::new(10);
    history.record("list");
    history.record("list");
    history.record("tps");
    history.record("list");
    assert_eq!(history.entries().len(), 3);
}

#[test]
fn history_is_bounded() {
    let mut history = InputHistory::new(2);
    history.record("a");
    history.record("b");
    history.record("c");
    assert_eq!(history.entries(), &VecDeque::from(vec!["b".to_string(), "c".to_string()]));
}

#[test]
fn recording_ends_navigation() {
    let mut history = InputHistory::new(10);
    history.record("a");
    history.previous("");
    history.record("b");
    assert!(!history.is_navigating());
    assert_eq!(history.previous(""), Some("b"));
}

#[test]
fn policy_deserializes_from_config_names() {
    #[derive(Deserialize)]
    struct Wrapper {
        policy: EmptyInputPolicy,
    }
    let drop: Wrapper = toml::from_str("policy = \"drop\"").unwrap();
    let send: Wrapper = toml::from_str("policy = \"send\"").unwrap();
    assert_eq!(drop.policy, EmptyInputPolicy::Drop);
    assert_eq!(send.policy, EmptyInputPolicy::SendEmptyMessage);
}
