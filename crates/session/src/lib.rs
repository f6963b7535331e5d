//! Application context: one navigator, one optional profile and the
//! comparison derived from it.

use calculator::{PersonalSummary, ReformCalculator, ReformComparison};
use chrono::{DateTime, Utc};
use navigator::{PageHost, StepNavigator};
use shared::{domain::UserProfile, error::ValidationError, protocol::GuideEvent};
use storage::KeyValueStore;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

pub mod form;

pub use form::FormInput;

pub struct Session<H: PageHost, S: KeyValueStore> {
    navigator: StepNavigator<H>,
    calculator: ReformCalculator,
    store: S,
    profile: Option<UserProfile>,
    comparison: Option<ReformComparison>,
    events: broadcast::Sender<GuideEvent>,
}

impl<H: PageHost, S: KeyValueStore> Session<H, S> {
    /// Profile events go out on the navigator's channel, so one receiver
    /// sees every change in order.
    pub fn new(navigator: StepNavigator<H>, calculator: ReformCalculator, store: S) -> Self {
        let events = navigator.event_sender();
        Self {
            navigator,
            calculator,
            store,
            profile: None,
            comparison: None,
            events,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<GuideEvent> {
        self.events.subscribe()
    }

    /// Validates and saves the form, then moves past the form section.
    /// A store that cannot be written only costs persistence.
    pub async fn submit_form(&mut self, input: &FormInput) -> Result<(), ValidationError> {
        let profile = input.parse()?;
        if let Err(error) = storage::save_profile(&self.store, &profile).await {
            warn!(error = %error, "could not save profile; continuing without persistence");
        }
        info!(sector = %profile.sector, "profile submitted");

        self.install(profile);
        self.navigator.next();
        Ok(())
    }

    /// Continues with the canonical example profile; nothing is persisted and
    /// any previously saved profile is dropped.
    pub async fn use_example_data(&mut self) {
        self.forget_saved_profile().await;
        self.install(UserProfile::example());
        self.navigator.next();
    }

    pub async fn reset(&mut self) {
        self.forget_saved_profile().await;
        self.profile = None;
        self.comparison = None;
        info!("profile cleared");
        let _ = self.events.send(GuideEvent::ProfileCleared);
    }

    /// Loads and installs the saved profile, if any, returning when it was
    /// saved.
    pub async fn restore(&mut self) -> Option<DateTime<Utc>> {
        let saved = storage::load_profile(&self.store).await?;
        debug!(saved_at = %saved.saved_at, "restoring saved profile");
        self.install(saved.profile);
        Some(saved.saved_at)
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn comparison(&self) -> Option<&ReformComparison> {
        self.comparison.as_ref()
    }

    pub fn summary(&self) -> Option<PersonalSummary> {
        let profile = self.profile.as_ref()?;
        let comparison = self.comparison.as_ref()?;
        Some(calculator::summary::build(profile, comparison))
    }

    pub fn has_user_data(&self) -> bool {
        self.profile
            .as_ref()
            .is_some_and(|profile| profile.base_salary > 0.0)
    }

    pub fn calculator(&self) -> &ReformCalculator {
        &self.calculator
    }

    pub fn navigator(&self) -> &StepNavigator<H> {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut StepNavigator<H> {
        &mut self.navigator
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn forget_saved_profile(&self) {
        if let Err(error) = storage::clear_profile(&self.store).await {
            warn!(error = %error, "could not clear saved profile");
        }
    }

    fn install(&mut self, profile: UserProfile) {
        let comparison = self.calculator.compare(&profile);
        let is_example = profile.is_example_data;
        self.profile = Some(profile);
        self.comparison = Some(comparison);
        let _ = self.events.send(GuideEvent::ProfileChanged { is_example });
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
