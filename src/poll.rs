use std::fmt;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

use crate::controller::{Attach, ThemeController};
use crate::page::{Page, ThemeStore};

#[derive(Debug)]
pub enum PollError {
    TimedOut { after: Duration, ticks: u64 },
    /// The check itself failed; polling stops at the first failure.
    Check(anyhow::Error),
}

impl fmt::Display for PollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollError::TimedOut { after, ticks } => write!(
                f,
                "gave up after {}ms ({ticks} checks)",
                after.as_millis()
            ),
            PollError::Check(_) => f.write_str("readiness check failed"),
        }
    }
}

impl std::error::Error for PollError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PollError::TimedOut { .. } => None,
            PollError::Check(err) => Some(err.as_ref()),
        }
    }
}

/// Calls `probe` every `period` until it yields a value or fails. The first
/// check runs immediately. Without a `timeout` this never gives up.
pub async fn poll_until<T, F>(
    period: Duration,
    timeout: Option<Duration>,
    mut probe: F,
) -> Result<T, PollError>
where
    F: FnMut() -> anyhow::Result<Option<T>>,
{
    let start = Instant::now();
    let mut ticker = tokio::time::interval(period.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut ticks = 0u64;

    loop {
        ticker.tick().await;
        ticks += 1;
        if let Some(found) = probe().map_err(PollError::Check)? {
            tracing::trace!(ticks, "poll satisfied");
            return Ok(found);
        }
        if let Some(limit) = timeout {
            let elapsed = start.elapsed();
            if elapsed >= limit {
                return Err(PollError::TimedOut {
                    after: elapsed,
                    ticks,
                });
            }
        }
    }
}

/// Applies the saved theme, then keeps trying to attach the toggle.
pub async fn attach_when_ready<P: Page, S: ThemeStore>(
    controller: &mut ThemeController<P, S>,
    period: Duration,
    timeout: Option<Duration>,
) -> Result<(), PollError> {
    if controller.init_theme() == Attach::Attached {
        return Ok(());
    }
    poll_until(period, timeout, || Ok(controller.add_toggle_button().then_some(()))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeConfig;
    use crate::html::HtmlPage;
    use crate::page::MemoryStore;

    #[tokio::test(start_paused = true)]
    async fn stops_once_probe_succeeds() {
        let mut calls = 0;
        let found = poll_until(Duration::from_millis(100), None, || {
            calls += 1;
            Ok((calls == 4).then_some(calls))
        })
        .await
        .unwrap();
        assert_eq!(found, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_when_asked() {
        let err = poll_until::<(), _>(
            Duration::from_millis(100),
            Some(Duration::from_millis(350)),
            || Ok(None),
        )
        .await
        .unwrap_err();
        let PollError::TimedOut { after, ticks } = err else {
            panic!("expected timeout, got {err}");
        };
        assert!(after >= Duration::from_millis(350));
        assert_eq!(ticks, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn failing_check_stops_polling() {
        let mut calls = 0;
        let err = poll_until::<(), _>(Duration::from_millis(100), None, || {
            calls += 1;
            if calls == 3 {
                anyhow::bail!("permission denied");
            }
            Ok(None)
        })
        .await
        .unwrap_err();
        assert!(matches!(err, PollError::Check(_)));
        assert_eq!(calls, 3);
        assert!(format!("{:#}", anyhow::Error::new(err)).contains("permission denied"));
    }

    #[tokio::test(start_paused = true)]
    async fn attaches_immediately_when_nav_present() {
        let page = HtmlPage::parse(
            r#"<html><body><div class="navbar-right"></div></body></html>"#,
        );
        let mut c = ThemeController::new(page, MemoryStore::new(), ThemeConfig::default());
        attach_when_ready(&mut c, Duration::from_millis(100), Some(Duration::ZERO))
            .await
            .unwrap();
        assert_eq!(c.page().count("#theme-toggle"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_nav_times_out_with_theme_applied() {
        let page = HtmlPage::parse("<html><body></body></html>");
        let mut c = ThemeController::new(page, MemoryStore::new(), ThemeConfig::default());
        let res =
            attach_when_ready(&mut c, Duration::from_millis(100), Some(Duration::from_millis(300)))
                .await;
        assert!(res.is_err());
        assert_eq!(c.page().root_attribute("data-theme").as_deref(), Some("dark"));
    }
}
