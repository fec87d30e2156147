use super::{LifecycleController, Outcome};
use crate::error::{Error, Result};
use crate::service::Service;

/// Batch operations. Services are processed one at a time, in the order given,
/// and every service is attempted even after an earlier one fails.
impl LifecycleController<'_> {
    pub async fn up_all(&self, services: &[&Service]) -> Result<()> {
        if self.up_each(services).await? {
            Ok(())
        } else {
            Err(Error::StartFailed(
                "One or more services failed to start".to_string(),
            ))
        }
    }

    pub async fn down_all(&self, services: &[&Service]) -> Result<()> {
        if self.down_each(services).await? {
            Ok(())
        } else {
            Err(Error::StopFailed(
                "One or more services failed to stop".to_string(),
            ))
        }
    }

    /// Stop everything, then start everything, regardless of stop failures.
    ///
    /// A stop failure is reported in preference to a start failure.
    pub async fn bounce_all(&self, services: &[&Service]) -> Result<()> {
        let stopped = self.down_each(services).await?;
        let started = self.up_each(services).await?;

        if !stopped {
            return Err(Error::StopFailed(
                "One or more services failed to stop".to_string(),
            ));
        }
        if !started {
            return Err(Error::StartFailed(
                "One or more services failed to restart".to_string(),
            ));
        }
        Ok(())
    }

    /// Check every service; succeeds only if all report running.
    pub async fn status_all(&self, services: &[&Service]) -> Result<()> {
        let mut all_running = true;
        for service in services {
            all_running &= self.status(service).await?.is_running();
        }
        if all_running {
            Ok(())
        } else {
            Err(Error::SomeDown)
        }
    }

    async fn up_each(&self, services: &[&Service]) -> Result<bool> {
        let mut ok = true;
        for service in services {
            let outcome = self.up(service).await?;
            log_outcome(service, outcome);
            ok &= outcome.is_success();
        }
        Ok(ok)
    }

    async fn down_each(&self, services: &[&Service]) -> Result<bool> {
        let mut ok = true;
        for service in services {
            let outcome = self.down(service).await?;
            log_outcome(service, outcome);
            ok &= outcome.is_success();
        }
        Ok(ok)
    }
}

fn log_outcome(service: &Service, outcome: Outcome) {
    if outcome.is_success() {
        tracing::debug!(service = %service.name, ?outcome, "Lifecycle step finished");
    } else {
        tracing::info!(service = %service.name, ?outcome, "Lifecycle step failed");
    }
}
