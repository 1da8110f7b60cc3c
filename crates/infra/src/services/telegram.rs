use super::SendError;
use serde::Deserialize;
use std::sync::Mutex;
use std::time::Duration;
use tarefa_domain::{local_date_of_millis, ReminderCategory, Task};

const TELEGRAM_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait::async_trait]
pub trait ITelegramService: Send + Sync {
    /// Renders and posts one reminder to the given chat. `chat_id` must be
    /// non-empty; the engine checks that before calling.
    async fn send_task_reminder(
        &self,
        chat_id: &str,
        task: &Task,
        category: ReminderCategory,
    ) -> Result<(), SendError>;
}

#[derive(Debug, Deserialize)]
struct TelegramApiResponse {
    ok: bool,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramBotService {
    bot_token: String,
    api_url: String,
    client: reqwest::Client,
}

impl TelegramBotService {
    pub fn new(bot_token: String) -> Self {
        let api_url = format!("https://api.telegram.org/bot{}", bot_token);
        let client = reqwest::Client::builder()
            .timeout(TELEGRAM_TIMEOUT)
            .build()
            .expect("To build http client");
        Self {
            bot_token,
            api_url,
            client,
        }
    }
}

/// Maps Bot API error codes to actionable diagnostics. The chat-not-found
/// case is the most common operator-facing misconfiguration: the bot
/// cannot initiate a conversation, the user has to message it first.
fn translate_api_error(error_code: i64, description: &str, chat_id: &str) -> SendError {
    match error_code {
        400 => {
            if description == "Bad Request: chat not found" {
                SendError::ChatNotFound(chat_id.to_string())
            } else {
                SendError::Provider {
                    code: 400,
                    description: description.to_string(),
                }
            }
        }
        401 => SendError::InvalidBotToken,
        403 => SendError::BotBlocked,
        code => SendError::Provider {
            code,
            description: description.to_string(),
        },
    }
}

fn reminder_message(task: &Task, category: ReminderCategory) -> String {
    let (emoji, headline) = match category {
        ReminderCategory::DueSoon => ("⏰", "Tarefa vence amanhã!"),
        ReminderCategory::DueToday => ("📅", "Tarefa vence hoje!"),
        ReminderCategory::Overdue => ("⚠️", "Tarefa atrasada!"),
    };
    let due_date = task
        .due_date
        .map(|due| local_date_of_millis(due).format("%d/%m/%Y").to_string())
        .unwrap_or_default();

    format!(
        "{} <b>{}</b>\n\n<b>{}</b>\n{}\n\n<b>Prioridade:</b> {}\n<b>Data de vencimento:</b> {}",
        emoji, headline, task.title, task.description, task.priority, due_date,
    )
}

#[async_trait::async_trait]
impl ITelegramService for TelegramBotService {
    async fn send_task_reminder(
        &self,
        chat_id: &str,
        task: &Task,
        category: ReminderCategory,
    ) -> Result<(), SendError> {
        if self.bot_token.is_empty() {
            return Err(SendError::NotConfigured(
                "telegram bot token not configured".into(),
            ));
        }
        if chat_id.is_empty() {
            return Err(SendError::NotConfigured(
                "user telegram chat ID not configured".into(),
            ));
        }

        let payload = serde_json::json!({
            "chat_id": chat_id,
            "text": reminder_message(task, category),
            "parse_mode": "HTML",
        });

        let response = self
            .client
            .post(format!("{}/sendMessage", self.api_url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| SendError::Transport(format!("Failed to send telegram message: {}", e)))?;

        if response.status().is_success() {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .map_err(|e| SendError::Transport(format!("Invalid telegram response: {}", e)))?;
        match serde_json::from_str::<TelegramApiResponse>(&body) {
            Ok(api_response) if !api_response.ok => Err(translate_api_error(
                api_response.error_code.unwrap_or_default(),
                api_response.description.as_deref().unwrap_or_default(),
                chat_id,
            )),
            _ => Err(SendError::Transport(format!("Telegram API error: {}", body))),
        }
    }
}

/// Record of a reminder accepted by the in-memory double
#[derive(Debug, Clone)]
pub struct SentTelegramMessage {
    pub chat_id: String,
    pub task_title: String,
    pub category: ReminderCategory,
}

pub struct InMemoryTelegramService {
    pub sent: Mutex<Vec<SentTelegramMessage>>,
    fail_with: Mutex<Option<SendError>>,
}

impl InMemoryTelegramService {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            fail_with: Mutex::new(None),
        }
    }

    pub fn set_failure(&self, err: Option<SendError>) {
        *self.fail_with.lock().unwrap() = err;
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ITelegramService for InMemoryTelegramService {
    async fn send_task_reminder(
        &self,
        chat_id: &str,
        task: &Task,
        category: ReminderCategory,
    ) -> Result<(), SendError> {
        if chat_id.is_empty() {
            return Err(SendError::NotConfigured(
                "user telegram chat ID not configured".into(),
            ));
        }
        if let Some(err) = self.fail_with.lock().unwrap().clone() {
            return Err(err);
        }
        self.sent.lock().unwrap().push(SentTelegramMessage {
            chat_id: chat_id.to_string(),
            task_title: task.title.clone(),
            category,
        });
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tarefa_domain::{TaskType, ID};

    fn task() -> Task {
        let mut task = Task::new(ID::new(), "reunião de equipe".into(), TaskType::Trabalho, 0);
        task.description = "preparar a pauta".into();
        task.due_date = Some(1_686_830_000_000);
        task
    }

    #[tokio::test]
    async fn missing_bot_token_is_a_configuration_error() {
        let service = TelegramBotService::new(String::new());
        let err = service
            .send_task_reminder("12345", &task(), ReminderCategory::DueToday)
            .await
            .unwrap_err();
        assert!(matches!(err, SendError::NotConfigured(_)));
    }

    #[test]
    fn it_translates_chat_not_found() {
        let err = translate_api_error(400, "Bad Request: chat not found", "12345");
        match err {
            SendError::ChatNotFound(ref chat_id) => assert_eq!(chat_id, "12345"),
            other => panic!("expected ChatNotFound, got {:?}", other),
        }
        assert!(err
            .to_string()
            .contains("needs to send a message to the bot first"));
    }

    #[test]
    fn it_translates_unauthorized_and_forbidden() {
        assert!(matches!(
            translate_api_error(401, "Unauthorized", "1"),
            SendError::InvalidBotToken
        ));
        assert!(matches!(
            translate_api_error(403, "Forbidden: bot was blocked by the user", "1"),
            SendError::BotBlocked
        ));
    }

    #[test]
    fn other_errors_pass_the_description_through() {
        let err = translate_api_error(429, "Too Many Requests: retry after 35", "1");
        match err {
            SendError::Provider { code, description } => {
                assert_eq!(code, 429);
                assert!(description.contains("Too Many Requests"));
            }
            other => panic!("expected Provider, got {:?}", other),
        }
    }

    #[test]
    fn message_headline_follows_the_category() {
        let task = task();
        assert!(reminder_message(&task, ReminderCategory::DueSoon).contains("vence amanhã"));
        assert!(reminder_message(&task, ReminderCategory::DueToday).contains("vence hoje"));
        assert!(reminder_message(&task, ReminderCategory::Overdue).contains("atrasada"));
        let msg = reminder_message(&task, ReminderCategory::DueToday);
        assert!(msg.contains("reunião de equipe"));
        assert!(msg.contains("Prioridade"));
    }
}
