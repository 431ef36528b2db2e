//! Entry shapes of the two feeds and the markup each one renders to.

use serde::Deserialize;

use crate::i18n::LocalizedField;
use crate::render::{RenderContext, RenderEntry};

/// Dictionary key labelling the link on every game card.
pub const VIEW_GAME_KEY: &str = "viewGameButton";
const VIEW_GAME_DEFAULT: &str = "View Game";

/// One related game, as served by the games feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameEntry {
    pub image: String,
    pub title: LocalizedField,
    pub description: LocalizedField,
    pub url: String,
}

impl RenderEntry for GameEntry {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let title = ctx.localize(&self.title);
        let description = ctx.localize(&self.description);
        let label = ctx.translate_or(VIEW_GAME_KEY, VIEW_GAME_DEFAULT);
        format!(
            concat!(
                "<div class=\"game-card\">",
                "<img src=\"{image}\" alt=\"{title}\">",
                "<h3>{title}</h3>",
                "<p>{description}</p>",
                "<a href=\"{url}\" target=\"_blank\" data-lang-key=\"{key}\">{label}</a>",
                "</div>"
            ),
            image = self.image,
            title = title,
            description = description,
            url = self.url,
            key = VIEW_GAME_KEY,
            label = label,
        )
    }
}

/// One question/answer pair from the FAQ feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FaqEntry {
    pub question: LocalizedField,
    pub answer: LocalizedField,
}

impl RenderEntry for FaqEntry {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        format!(
            concat!(
                "<div class=\"faq-item\"><details>",
                "<summary><span>{question}</span></summary>",
                "<div class=\"faq-answer\">{answer}</div>",
                "</details></div>"
            ),
            question = ctx.localize(&self.question),
            answer = ctx.localize(&self.answer),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{LanguageCode, TranslationDictionary};

    fn dictionary() -> TranslationDictionary {
        TranslationDictionary::from_json_str(
            r#"{"en": {"viewGameButton": "View"}, "fr": {"viewGameButton": "Voir"}}"#,
            LanguageCode::fallback(),
        )
        .unwrap()
    }

    #[test]
    fn game_card_uses_current_language_and_verbatim_urls() {
        let dict = dictionary();
        let fr = LanguageCode::from("fr");
        let ctx = RenderContext::new(&fr, &dict);
        let game: GameEntry = serde_json::from_str(
            r#"{
                "image": "img/maze.png",
                "title": {"en": "Maze", "fr": "Labyrinthe"},
                "description": {"en": "Find the exit"},
                "url": "https://example.com/maze?a=1&b=2"
            }"#,
        )
        .unwrap();

        let html = game.render(&ctx);
        assert!(html.contains("<img src=\"img/maze.png\" alt=\"Labyrinthe\">"));
        assert!(html.contains("<h3>Labyrinthe</h3>"));
        assert!(html.contains("<p>Find the exit</p>"));
        assert!(html.contains("href=\"https://example.com/maze?a=1&b=2\""));
        assert!(html.contains(">Voir</a>"));
    }

    #[test]
    fn faq_answer_falls_back_then_goes_empty() {
        let dict = dictionary();
        let de = LanguageCode::from("de");
        let ctx = RenderContext::new(&de, &dict);
        let entry = FaqEntry {
            question: LocalizedField::new().with("de", "Wie?"),
            answer: LocalizedField::new().with("en", "Like this."),
        };
        let html = entry.render(&ctx);
        assert!(html.contains("<span>Wie?</span>"));
        assert!(html.contains("<div class=\"faq-answer\">Like this.</div>"));

        let empty = FaqEntry {
            question: LocalizedField::new().with("fr", "Quoi?"),
            answer: LocalizedField::new(),
        };
        let html = empty.render(&ctx);
        assert!(html.contains("<span></span>"));
    }

    #[test]
    fn missing_required_fields_do_not_parse() {
        let parsed: Result<Vec<GameEntry>, _> =
            serde_json::from_str(r#"[{"title": {"en": "No image"}}]"#);
        assert!(parsed.is_err());
    }
}
