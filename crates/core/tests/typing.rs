//! Tests for the typing effect.

use futures_util::StreamExt;
use std::time::Duration;
use wcore::typewriter;

#[tokio::test]
async fn concatenation_matches_input() {
    let text = "맑음, then **sunny** 🌞\nline two";
    let typed: String = typewriter(text, Duration::ZERO).collect().await;
    assert_eq!(typed, text);
}

#[tokio::test]
async fn yields_one_char_per_item() {
    let chars: Vec<char> = typewriter("abc", Duration::ZERO).collect().await;
    assert_eq!(chars, ['a', 'b', 'c']);
}

#[tokio::test]
async fn restarts_from_the_beginning() {
    let text = "again";
    let first: String = typewriter(text, Duration::ZERO).collect().await;
    let second: String = typewriter(text, Duration::ZERO).collect().await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn empty_text_is_empty_stream() {
    let count = typewriter("", Duration::ZERO).count().await;
    assert_eq!(count, 0);
}

#[tokio::test(start_paused = true)]
async fn delay_between_characters() {
    let start = tokio::time::Instant::now();
    let typed: String = typewriter("abcd", Duration::from_millis(10)).collect().await;
    assert_eq!(typed, "abcd");
    assert!(start.elapsed() >= Duration::from_millis(30));
}
