use crate::notification::send_task_reminders::SendTaskRemindersUseCase;
use crate::shared::usecase::execute;
use chrono::Utc;
use std::time::Duration;
use tarefa_infra::TarefaContext;
use tracing::{info, warn};

/// Fallback pause when the cadence expression cannot be parsed
const FALLBACK_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Starts the background reminder job. When notifications are disabled by
/// configuration the job is never spawned at all, not merely skipped per
/// tick.
pub fn start_notification_job(ctx: TarefaContext) {
    if !ctx.config.notifications_enabled {
        info!("Notifications are disabled");
        return;
    }

    let expression = ctx.config.notification_check_interval.clone();
    if cron::next_run_from_cron(&expression, Utc::now()).is_none() {
        warn!(
            "Invalid notification check interval '{}', falling back to hourly",
            expression
        );
    }
    info!("Notification scheduler started with interval: {}", expression);

    actix_web::rt::spawn(async move {
        loop {
            let now = Utc::now();
            let pause = match cron::next_run_from_cron(&expression, now) {
                Some(next) => (next - now).to_std().unwrap_or(FALLBACK_INTERVAL),
                None => FALLBACK_INTERVAL,
            };
            actix_web::rt::time::sleep(pause).await;

            info!("Running notification check...");
            let usecase = SendTaskRemindersUseCase {
                reference_time: ctx.sys.get_timestamp_millis(),
            };
            // Per-cycle failures are already logged; the job itself never
            // stops ticking
            let _ = execute(usecase, &ctx).await;
        }
    });
}

/// Minimal 5-field cron support: "MIN HOUR DOM MON DOW" with `*`, `*/N`
/// and comma lists on the minute and hour fields. Day fields accept only
/// `*`, which covers every cadence this service is configured with.
pub(crate) mod cron {
    use chrono::{DateTime, Duration, Timelike, Utc};

    pub fn next_run_from_cron(expression: &str, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let parts: Vec<&str> = expression.split_whitespace().collect();
        if parts.len() != 5 {
            return None;
        }

        let minutes = parse_field(parts[0], 0, 59)?;
        let hours = parse_field(parts[1], 0, 23)?;
        for day_field in &parts[2..5] {
            if *day_field != "*" {
                return None;
            }
        }

        let mut candidate = (after + Duration::minutes(1)).with_second(0)?;
        // A matching minute always exists within the next 24h
        for _ in 0..(24 * 60) {
            if minutes.contains(&candidate.minute()) && hours.contains(&candidate.hour()) {
                return Some(candidate);
            }
            candidate += Duration::minutes(1);
        }
        None
    }

    fn parse_field(field: &str, min: u32, max: u32) -> Option<Vec<u32>> {
        if field == "*" {
            return Some((min..=max).collect());
        }

        if let Some(step) = field.strip_prefix("*/") {
            let n: u32 = step.parse().ok()?;
            if n == 0 {
                return None;
            }
            return Some((min..=max).step_by(n as usize).collect());
        }

        if field.contains(',') {
            let values: Result<Vec<u32>, _> =
                field.split(',').map(|value| value.trim().parse()).collect();
            return values
                .ok()
                .map(|v| v.into_iter().filter(|n| *n >= min && *n <= max).collect());
        }

        let n: u32 = field.parse().ok()?;
        if n >= min && n <= max {
            Some(vec![n])
        } else {
            None
        }
    }
}
