use uuid::Uuid;

use crate::domain::{
    chat::{
        entities::ChatExchange,
        fallback::fallback_response,
        ports::{ChatRepository, ChatService},
        value_objects::{ChatReply, DailyGoals, Language, NutritionContext},
    },
    common::{
        entities::app_errors::CoreError,
        ports::{ChatRole, ChatTurn, LlmClient},
        services::Service,
    },
    menu::ports::MenuRepository,
    profile::ports::ProfileRepository,
};

/// Number of prior exchanges injected into the prompt context window.
const CONTEXT_EXCHANGES: u32 = 10;

const DEFAULT_HISTORY_LIMIT: u32 = 50;

const HEBREW_BASE_PROMPT: &str = "אתה יועץ תזונה AI מומחה שעוזר למשתמשים עם שאלות תזונה.\n\n\
⚠️ הגבלות חשובות:\n\
- אתה לא נותן ייעוץ רפואי מוסמך\n\
- במקרי בעיות בריאותיות חמורות - הפנה לרופא\n\
- תמיד הדגש שזה ייעוץ כללי ולא תחליף לייעוץ מקצועי\n\n\
🎯 התמחויות שלך:\n\
- המלצות תזונתיות מבוססות מדע\n\
- ניתוח ערכים תזונתיים\n\
- הצעות ארוחות מותאמות אישית\n\
- טיפים לבישול בריא\n\
- מידע על מזונות ורכיבים\n\n\
📊 מידע על המשתמש:";

const ENGLISH_BASE_PROMPT: &str = "You are an expert AI nutrition consultant helping users with nutrition questions.\n\n\
⚠️ Important limitations:\n\
- You do not provide licensed medical advice\n\
- For serious health issues - refer to a doctor\n\
- Always emphasize this is general advice and not a substitute for professional consultation\n\n\
🎯 Your specialties:\n\
- Science-based nutritional recommendations\n\
- Nutritional value analysis\n\
- Personalized meal suggestions\n\
- Healthy cooking tips\n\
- Food and ingredient information\n\n\
📊 User information:";

const HEBREW_INSTRUCTIONS: &str = "\n🔄 הוראות תגובה:\n\
- תן תשובות מעשיות ופרקטיות\n\
- השתמש במידע על המשתמש למתן המלצות מותאמות\n\
- אם נשאלת על מזון ספציפי - תן ניתוח מפורט\n\
- המלץ על ארוחות בהתאם ליעדים ולהגבלות\n\
- תמיד שמור על טון ידידותי ומקצועי";

const ENGLISH_INSTRUCTIONS: &str = "\n🔄 Response instructions:\n\
- Give practical and actionable answers\n\
- Use user information to provide personalized recommendations\n\
- If asked about specific food - give detailed analysis\n\
- Recommend meals according to goals and restrictions\n\
- Always maintain a friendly and professional tone";

pub fn build_system_prompt(language: Language, context: Option<&NutritionContext>) -> String {
    let (base, instructions, missing) = if language.is_hebrew() {
        (HEBREW_BASE_PROMPT, HEBREW_INSTRUCTIONS, "מידע על המשתמש לא זמין")
    } else {
        (
            ENGLISH_BASE_PROMPT,
            ENGLISH_INSTRUCTIONS,
            "User information not available",
        )
    };

    let context_info = match context {
        Some(ctx) => {
            let goals = ctx
                .daily_goals
                .as_ref()
                .map(|g| format!("{:.0} kcal, {:.0}g protein", g.calories, g.protein_g))
                .unwrap_or_else(|| "not available".to_string());
            let restrictions = if ctx.restrictions.is_empty() {
                "none".to_string()
            } else {
                ctx.restrictions.join(", ")
            };
            let allergies = if ctx.allergies.is_empty() {
                "none".to_string()
            } else {
                ctx.allergies.join(", ")
            };

            format!(
                "\nDaily goals: {}\nToday's intake: {:.0} kcal, {:.0}g protein, {:.0}g carbs, {:.0}g fat\nDietary restrictions: {}\nAllergies: {}\n",
                goals,
                ctx.today_intake.calories,
                ctx.today_intake.protein_g,
                ctx.today_intake.carbs_g,
                ctx.today_intake.fats_g,
                restrictions,
                allergies,
            )
        }
        None => format!("\n{}\n", missing),
    };

    format!("{}{}{}", base, context_info, instructions)
}

/// Interleave prior exchanges (chronological) with the current message.
pub fn build_conversation(history: &[ChatExchange], current: &str) -> Vec<ChatTurn> {
    let mut turns = Vec::with_capacity(history.len() * 2 + 1);

    for exchange in history {
        turns.push(ChatTurn {
            role: ChatRole::User,
            content: exchange.user_message.clone(),
        });
        turns.push(ChatTurn {
            role: ChatRole::Assistant,
            content: exchange.ai_response.clone(),
        });
    }

    turns.push(ChatTurn {
        role: ChatRole::User,
        content: current.to_string(),
    });

    turns
}

impl<M, C, P, L> Service<M, C, P, L>
where
    M: MenuRepository,
    C: ChatRepository,
    P: ProfileRepository,
    L: LlmClient,
{
    /// Context fetch failures degrade to "no context" rather than failing
    /// the message.
    async fn nutrition_context(&self, user_id: Uuid) -> Option<NutritionContext> {
        let plan = self.profile_repository.get_nutrition_plan(user_id).await;
        let intake = self.profile_repository.get_today_intake(user_id).await;
        let questionnaire = self.profile_repository.get_questionnaire(user_id).await;

        match (plan, intake, questionnaire) {
            (Ok(plan), Ok(today_intake), Ok(questionnaire)) => Some(NutritionContext {
                daily_goals: plan.map(|p| DailyGoals {
                    calories: p.goal_calories,
                    protein_g: p.goal_protein_g,
                    carbs_g: p.goal_carbs_g,
                    fats_g: p.goal_fats_g,
                }),
                today_intake,
                restrictions: questionnaire
                    .as_ref()
                    .and_then(|q| q.dietary_style.clone())
                    .map(|style| vec![style])
                    .unwrap_or_default(),
                allergies: questionnaire.map(|q| q.allergies).unwrap_or_default(),
            }),
            _ => {
                tracing::warn!("Failed to load nutrition context for user {}", user_id);
                None
            }
        }
    }
}

impl<M, C, P, L> ChatService for Service<M, C, P, L>
where
    M: MenuRepository,
    C: ChatRepository,
    P: ProfileRepository,
    L: LlmClient,
{
    async fn process_message(
        &self,
        user_id: Uuid,
        message: String,
        language: Language,
    ) -> Result<ChatReply, CoreError> {
        let context = self.nutrition_context(user_id).await;

        let mut recent = self
            .chat_repository
            .get_recent(user_id, CONTEXT_EXCHANGES)
            .await
            .unwrap_or_default();
        recent.reverse();

        let system_prompt = build_system_prompt(language, context.as_ref());
        let turns = build_conversation(&recent, &message);

        let response = match self.llm_client.complete_chat(system_prompt, turns).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) | Err(_) => fallback_response(&message, language).to_string(),
        };

        let exchange = ChatExchange::new(user_id, message, response.clone());
        let message_id = match self.chat_repository.create_exchange(exchange).await {
            Ok(saved) => Some(saved.id),
            Err(e) => {
                tracing::error!("Failed to persist chat exchange: {}", e);
                None
            }
        };

        Ok(ChatReply {
            response,
            message_id,
        })
    }

    async fn get_history(
        &self,
        user_id: Uuid,
        limit: Option<u32>,
    ) -> Result<Vec<ChatExchange>, CoreError> {
        let mut exchanges = self
            .chat_repository
            .get_recent(user_id, limit.unwrap_or(DEFAULT_HISTORY_LIMIT))
            .await?;
        exchanges.reverse();
        Ok(exchanges)
    }

    async fn clear_history(&self, user_id: Uuid) -> Result<(), CoreError> {
        self.chat_repository.clear(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        chat::ports::MockChatRepository, common::ports::MockLlmClient,
        menu::ports::MockMenuRepository, profile::entities::DailyIntake,
        profile::ports::MockProfileRepository,
    };
    use mockall::predicate::eq;

    fn profile_repo_without_context() -> MockProfileRepository {
        let mut profile = MockProfileRepository::new();
        profile
            .expect_get_nutrition_plan()
            .returning(|_| Box::pin(async { Ok(None) }));
        profile
            .expect_get_today_intake()
            .returning(|_| Box::pin(async { Ok(DailyIntake::default()) }));
        profile
            .expect_get_questionnaire()
            .returning(|_| Box::pin(async { Ok(None) }));
        profile
    }

    fn service_with(
        chat: MockChatRepository,
        llm: MockLlmClient,
    ) -> Service<MockMenuRepository, MockChatRepository, MockProfileRepository, MockLlmClient>
    {
        Service::new(
            MockMenuRepository::new(),
            chat,
            profile_repo_without_context(),
            llm,
        )
    }

    fn exchange_at(user_id: Uuid, msg: &str, secs_ago: i64) -> ChatExchange {
        let mut ex = ChatExchange::new(user_id, msg.to_string(), format!("reply to {}", msg));
        ex.created_at -= chrono::Duration::seconds(secs_ago);
        ex
    }

    #[tokio::test]
    async fn provider_failure_still_returns_response_and_persists_once() {
        let user_id = Uuid::new_v4();

        let mut llm = MockLlmClient::new();
        llm.expect_complete_chat().returning(|_, _| {
            Box::pin(async { Err(CoreError::LlmUnavailable) })
        });

        let mut chat = MockChatRepository::new();
        chat.expect_get_recent()
            .returning(|_, _| Box::pin(async { Ok(Vec::new()) }));
        chat.expect_create_exchange()
            .times(1)
            .returning(|ex| Box::pin(async move { Ok(ex) }));

        let service = service_with(chat, llm);
        let reply = service
            .process_message(user_id, "hello".to_string(), Language::English)
            .await
            .unwrap();

        assert!(!reply.response.is_empty());
        assert!(reply.message_id.is_some());
    }

    #[tokio::test]
    async fn provider_response_is_persisted_and_returned() {
        let user_id = Uuid::new_v4();

        let mut llm = MockLlmClient::new();
        llm.expect_complete_chat()
            .returning(|_, _| Box::pin(async { Ok("Eat more fiber.".to_string()) }));

        let mut chat = MockChatRepository::new();
        chat.expect_get_recent()
            .returning(|_, _| Box::pin(async { Ok(Vec::new()) }));
        chat.expect_create_exchange()
            .times(1)
            .withf(|ex| ex.ai_response == "Eat more fiber.")
            .returning(|ex| Box::pin(async move { Ok(ex) }));

        let service = service_with(chat, llm);
        let reply = service
            .process_message(user_id, "fiber?".to_string(), Language::English)
            .await
            .unwrap();

        assert_eq!(reply.response, "Eat more fiber.");
    }

    #[tokio::test]
    async fn history_is_returned_oldest_first() {
        let user_id = Uuid::new_v4();
        // Repository returns newest first.
        let newest = exchange_at(user_id, "third", 0);
        let middle = exchange_at(user_id, "second", 60);
        let oldest = exchange_at(user_id, "first", 120);

        let mut chat = MockChatRepository::new();
        let stored = vec![newest, middle, oldest];
        chat.expect_get_recent()
            .with(eq(user_id), eq(50u32))
            .returning(move |_, _| {
                let stored = stored.clone();
                Box::pin(async move { Ok(stored) })
            });

        let service = service_with(chat, MockLlmClient::new());
        let history = service.get_history(user_id, None).await.unwrap();

        let order: Vec<&str> = history.iter().map(|e| e.user_message.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn clear_then_get_returns_empty() {
        let user_id = Uuid::new_v4();

        let mut chat = MockChatRepository::new();
        chat.expect_clear()
            .with(eq(user_id))
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));
        chat.expect_get_recent()
            .returning(|_, _| Box::pin(async { Ok(Vec::new()) }));

        let service = service_with(chat, MockLlmClient::new());
        service.clear_history(user_id).await.unwrap();
        let history = service.get_history(user_id, None).await.unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn conversation_interleaves_history_before_current_message() {
        let user_id = Uuid::new_v4();
        let history = vec![exchange_at(user_id, "q1", 60)];
        let turns = build_conversation(&history, "q2");

        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].role, ChatRole::User);
        assert_eq!(turns[0].content, "q1");
        assert_eq!(turns[1].role, ChatRole::Assistant);
        assert_eq!(turns[2].content, "q2");
    }

    #[test]
    fn system_prompt_mentions_missing_context() {
        let prompt = build_system_prompt(Language::English, None);
        assert!(prompt.contains("User information not available"));
    }
}
