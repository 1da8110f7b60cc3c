use super::SendError;
use crate::config::SmtpSettings;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::sync::Mutex;
use std::time::Duration;
use tarefa_domain::{local_date_of_millis, ReminderCategory, Task};

const SMTP_TIMEOUT: Duration = Duration::from_secs(15);

#[async_trait::async_trait]
pub trait IEmailService: Send + Sync {
    /// Renders and delivers one reminder email. `to` must be a non-empty
    /// address; the engine checks that before calling, and an empty value
    /// fails fast as a configuration error.
    async fn send_task_reminder(
        &self,
        to: &str,
        task: &Task,
        category: ReminderCategory,
    ) -> Result<(), SendError>;
}

pub struct SmtpEmailService {
    settings: SmtpSettings,
}

impl SmtpEmailService {
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }
}

fn formatted_due_date(task: &Task) -> String {
    task.due_date
        .map(|due| local_date_of_millis(due).format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

fn reminder_subject(task: &Task, category: ReminderCategory) -> String {
    match category {
        ReminderCategory::DueSoon => format!("⏰ Tarefa vence amanhã: {}", task.title),
        ReminderCategory::DueToday => format!("📅 Tarefa vence hoje: {}", task.title),
        ReminderCategory::Overdue => format!("⚠️ Tarefa atrasada: {}", task.title),
    }
}

fn reminder_body(task: &Task, category: ReminderCategory) -> String {
    let headline = match category {
        ReminderCategory::DueSoon => "Tarefa vence amanhã!",
        ReminderCategory::DueToday => "Tarefa vence hoje!",
        ReminderCategory::Overdue => "Tarefa atrasada!",
    };
    format!(
        r#"<html>
<body>
    <h2>{}</h2>
    <p><strong>{}</strong></p>
    <p>{}</p>
    <p><strong>Prioridade:</strong> {}</p>
    <p><strong>Data de vencimento:</strong> {}</p>
</body>
</html>"#,
        headline,
        task.title,
        task.description,
        task.priority,
        formatted_due_date(task),
    )
}

#[async_trait::async_trait]
impl IEmailService for SmtpEmailService {
    async fn send_task_reminder(
        &self,
        to: &str,
        task: &Task,
        category: ReminderCategory,
    ) -> Result<(), SendError> {
        if !self.settings.is_configured() {
            return Err(SendError::NotConfigured("email service not configured".into()));
        }
        if to.is_empty() {
            return Err(SendError::NotConfigured(
                "recipient email address not configured".into(),
            ));
        }

        let from: Mailbox = self
            .settings
            .from
            .parse()
            .map_err(|_| SendError::NotConfigured("SMTP_FROM address is not valid".into()))?;
        let to: Mailbox = to
            .parse()
            .map_err(|e| SendError::Transport(format!("Invalid recipient address: {}", e)))?;

        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(reminder_subject(task, category))
            .header(ContentType::TEXT_HTML)
            .body(reminder_body(task, category))
            .map_err(|e| SendError::Transport(format!("Failed to build email: {}", e)))?;

        let credentials = Credentials::new(
            self.settings.user.clone(),
            self.settings.password.clone(),
        );
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.host)
            .map_err(|e| SendError::Transport(format!("Invalid SMTP relay: {}", e)))?
            .port(self.settings.port)
            .credentials(credentials)
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        mailer
            .send(email)
            .await
            .map(|_| ())
            .map_err(|e| SendError::Transport(e.to_string()))
    }
}

/// Record of a reminder accepted by the in-memory double
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub task_title: String,
    pub category: ReminderCategory,
}

/// Test double in the style of the in-memory repos: records every accepted
/// send and optionally fails with an injected error.
pub struct InMemoryEmailService {
    pub sent: Mutex<Vec<SentEmail>>,
    fail_with: Mutex<Option<SendError>>,
}

impl InMemoryEmailService {
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
impl IEmailService for InMemoryEmailService {
    async fn send_task_reminder(
        &self,
        to: &str,
        task: &Task,
        category: ReminderCategory,
    ) -> Result<(), SendError> {
        if to.is_empty() {
            return Err(SendError::NotConfigured(
                "recipient email address not configured".into(),
            ));
        }
        if let Some(err) = self.fail_with.lock().unwrap().clone() {
            return Err(err);
        }
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
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

    fn task_due_at(due: i64) -> Task {
        let mut task = Task::new(ID::new(), "pagar contas".into(), TaskType::Casa, 0);
        task.description = "luz e internet".into();
        task.due_date = Some(due);
        task
    }

    #[tokio::test]
    async fn unconfigured_service_fails_fast() {
        let service = SmtpEmailService::new(SmtpSettings::default());
        let err = service
            .send_task_reminder("a@x.com", &task_due_at(0), ReminderCategory::DueToday)
            .await
            .unwrap_err();
        assert!(matches!(err, SendError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn empty_destination_is_a_configuration_error() {
        let settings = SmtpSettings {
            host: "smtp.example.com".into(),
            port: 587,
            user: "mailer".into(),
            password: "hunter2".into(),
            from: "Tarefa <noreply@example.com>".into(),
        };
        let service = SmtpEmailService::new(settings);
        let err = service
            .send_task_reminder("", &task_due_at(0), ReminderCategory::DueToday)
            .await
            .unwrap_err();
        assert!(matches!(err, SendError::NotConfigured(_)));
    }

    #[test]
    fn subject_headline_follows_the_category() {
        let task = task_due_at(1_686_830_000_000);
        assert!(reminder_subject(&task, ReminderCategory::DueSoon).contains("vence amanhã"));
        assert!(reminder_subject(&task, ReminderCategory::DueToday).contains("vence hoje"));
        assert!(reminder_subject(&task, ReminderCategory::Overdue).contains("atrasada"));
    }

    #[test]
    fn body_carries_title_description_priority_and_due_date() {
        let task = task_due_at(1_686_830_000_000);
        let body = reminder_body(&task, ReminderCategory::DueToday);
        assert!(body.contains("pagar contas"));
        assert!(body.contains("luz e internet"));
        assert!(body.contains("media"));
        assert!(body.contains(&formatted_due_date(&task)));
    }
}
