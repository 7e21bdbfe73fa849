//! Intent classification for free-text chat input
//!
//! Routes a user message to a specialized agent flow before dispatch.
//! This replaces scattered inline regex sniffing with one pure function
//! whose rules are independently testable: URL or image phrasing maps to
//! the visual flow, keyword groups map to the health/travel/business
//! agents, and everything else stays in plain chat.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Classified routing target for a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Message references an image or URL to look at
    Visual,
    /// Health, fitness, diet phrasing
    Health,
    /// Trip planning phrasing
    Travel,
    /// Business, career, startup phrasing
    Business,
    /// No specialized routing; stay with the active agent
    Chat,
}

fn url_pattern() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| Regex::new(r"https?://\S+").expect("static regex"))
}

fn image_pattern() -> &'static Regex {
    static IMAGE: OnceLock<Regex> = OnceLock::new();
    IMAGE.get_or_init(|| {
        Regex::new(r"(?i)\b\S+\.(png|jpe?g|gif|webp|bmp|svg)\b").expect("static regex")
    })
}

fn token_set(lowered: &str) -> BTreeSet<&str> {
    lowered
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Classify a free-text message into a routing intent
///
/// Pure function over the message text: no state, no network. Priority
/// order is visual, travel, health, business, chat; the first group with
/// a hit wins so a trip question mentioning "budget" routes to travel,
/// not business.
///
/// # Examples
///
/// ```
/// use codementor::intent::{classify, Intent};
///
/// assert_eq!(classify("plan a trip to Lisbon"), Intent::Travel);
/// assert_eq!(classify("look at https://example.com/chart"), Intent::Visual);
/// assert_eq!(classify("why does my loop never end?"), Intent::Chat);
/// ```
pub fn classify(text: &str) -> Intent {
    let lowered = text.to_lowercase();
    let tokens = token_set(&lowered);
    let has = |term: &str| tokens.contains(term);
    let has_any_phrase = |phrases: &[&str]| phrases.iter().any(|phrase| lowered.contains(phrase));

    if url_pattern().is_match(text)
        || image_pattern().is_match(text)
        || has_any_phrase(&["this screenshot", "this image", "this photo", "this diagram"])
    {
        return Intent::Visual;
    }

    if has_any_phrase(&["plan a trip", "travel to", "book a flight", "book a hotel"])
        || has("itinerary")
        || has("sightseeing")
        || (has("visit") && (has("city") || has("country")))
    {
        return Intent::Travel;
    }

    if has_any_phrase(&["lose weight", "workout plan", "meal plan"])
        || has("diet")
        || has("calories")
        || has("exercise")
        || (has("sleep") && has("schedule"))
    {
        return Intent::Health;
    }

    if has_any_phrase(&["business plan", "my startup", "pitch deck", "market research"])
        || has("revenue")
        || has("invoice")
        || (has("marketing") && has("strategy"))
    {
        return Intent::Business;
    }

    Intent::Chat
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_routes_to_visual() {
        assert_eq!(classify("check https://example.com/page"), Intent::Visual);
    }

    #[test]
    fn test_image_filename_routes_to_visual() {
        assert_eq!(classify("what is wrong in error.PNG"), Intent::Visual);
        assert_eq!(classify("see whiteboard.jpeg please"), Intent::Visual);
    }

    #[test]
    fn test_screenshot_phrase_routes_to_visual() {
        assert_eq!(classify("can you read this screenshot?"), Intent::Visual);
    }

    #[test]
    fn test_trip_phrases_route_to_travel() {
        assert_eq!(classify("Plan a trip to Japan in May"), Intent::Travel);
        assert_eq!(classify("build me an itinerary for Rome"), Intent::Travel);
    }

    #[test]
    fn test_health_keywords() {
        assert_eq!(classify("how many calories in rice?"), Intent::Health);
        assert_eq!(classify("I want a workout plan"), Intent::Health);
    }

    #[test]
    fn test_business_keywords() {
        assert_eq!(classify("review my business plan"), Intent::Business);
        assert_eq!(classify("how do I grow revenue"), Intent::Business);
    }

    #[test]
    fn test_priority_visual_over_travel() {
        assert_eq!(
            classify("plan a trip like https://example.com/blog"),
            Intent::Visual
        );
    }

    #[test]
    fn test_priority_travel_over_business() {
        // Mentions budget but is clearly a trip request
        assert_eq!(
            classify("plan a trip to Oslo on a startup budget"),
            Intent::Travel
        );
    }

    #[test]
    fn test_plain_coding_question_is_chat() {
        assert_eq!(classify("why does my loop never end?"), Intent::Chat);
        assert_eq!(classify(""), Intent::Chat);
    }

    #[test]
    fn test_substring_does_not_false_match_tokens() {
        // "dietrich" must not match the "diet" token
        assert_eq!(classify("who was Dietrich?"), Intent::Chat);
    }
}
