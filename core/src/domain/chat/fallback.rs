use crate::domain::chat::value_objects::Language;

/// One fallback rule: if any keyword matches the (lowercased) message, the
/// rule's template answers it. Rules are evaluated in order only when the
/// primary provider is unavailable or failed.
pub struct FallbackRule {
    pub keywords: &'static [&'static str],
    pub hebrew: &'static str,
    pub english: &'static str,
}

pub const FALLBACK_RULES: &[FallbackRule] = &[
    FallbackRule {
        keywords: &["קלוריות", "calories", "כמה"],
        hebrew: "כדי לתת לך מידע מדויק על קלוריות, אני צריך פרטים נוספים על המזון או הכמות. אתה יכול לצלם את המוצר או להכניס פרטים נוספים.",
        english: "To give you accurate calorie information, I need more details about the food or quantity. You can photograph the product or enter additional details.",
    },
    FallbackRule {
        keywords: &["המלצה", "recommendation", "מה לאכול"],
        hebrew: "אני אשמח להמליץ לך על ארוחות! בהתבסס על המידע שיש לי, אני מציע להתמקד בארוחות עם חלבון איכותי, ירקות טריים ופחמימות מורכבות. אתה יכול לספר לי על המטרות שלך או הגבלות תזונתיות ואתן המלצות ספציפיות יותר.",
        english: "I'd be happy to recommend meals for you! Based on the information I have, I suggest focusing on meals with quality protein, fresh vegetables, and complex carbohydrates. You can tell me about your goals or dietary restrictions and I'll give more specific recommendations.",
    },
];

pub const DEFAULT_FALLBACK: FallbackRule = FallbackRule {
    keywords: &[],
    hebrew: "אני כאן לעזור לך עם שאלות תזונה! אתה יכול לשאול אותי על ערכים תזונתיים, המלצות לארוחות, או כל שאלה אחרת הקשורה לתזונה. ⚠️ חשוב לזכור שזה ייעוץ כללי ולא תחליף לייעוץ רפואי מוסמך.",
    english: "I'm here to help with nutrition questions! You can ask me about nutritional values, meal recommendations, or any other nutrition-related questions. ⚠️ Important to remember this is general advice and not a substitute for licensed medical consultation.",
};

/// Deterministic templated response selected by keyword matching.
pub fn fallback_response(message: &str, language: Language) -> &'static str {
    let lower = message.to_lowercase();

    let rule = FALLBACK_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| lower.contains(kw)))
        .unwrap_or(&DEFAULT_FALLBACK);

    if language.is_hebrew() {
        rule.hebrew
    } else {
        rule.english
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calories_keyword_selects_calorie_rule() {
        let response = fallback_response("How many calories in an apple?", Language::English);
        assert!(response.contains("calorie information"));
    }

    #[test]
    fn recommendation_keyword_selects_recommendation_rule() {
        let response = fallback_response("Any meal recommendation?", Language::English);
        assert!(response.contains("recommend meals"));
    }

    #[test]
    fn hebrew_keyword_matches_regardless_of_language_field() {
        let response = fallback_response("כמה חלבון יש בביצה?", Language::Hebrew);
        assert_eq!(response, FALLBACK_RULES[0].hebrew);
    }

    #[test]
    fn unmatched_message_gets_default_response() {
        let response = fallback_response("hello there", Language::English);
        assert_eq!(response, DEFAULT_FALLBACK.english);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let response = fallback_response("CALORIES please", Language::English);
        assert!(response.contains("calorie information"));
    }

    #[test]
    fn fallback_is_never_empty() {
        for msg in ["", "calories", "recommendation", "random"] {
            assert!(!fallback_response(msg, Language::Hebrew).is_empty());
            assert!(!fallback_response(msg, Language::English).is_empty());
        }
    }
}
