//! Sequencing of the four generation stages.

use crate::{Presenter, StoryModal, UserAction, WorkflowConfig};
use cuentos_client::{ServiceReply, StoryService};
use cuentos_core::{
    CandidateKind, CandidateList, Endpoint, HeroesRequest, Session, Stage, StageFailure,
    StageReply, SummaryRequest, VillainsRequest,
};
use cuentos_error::{CuentosResult, GenerationError, ProtocolError, ProtocolErrorKind};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

/// Status shown while the summary request is in flight.
pub const GENERATING_SUMMARY: &str = "Generating summary...";

/// Status shown when a request to `endpoint` never produced a readable reply.
pub fn transport_status_text(endpoint: Endpoint) -> &'static str {
    match endpoint {
        Endpoint::Summary => "There was an error generating the summary.",
        Endpoint::Villains => "There was an error generating the villains.",
        Endpoint::Heroes => "There was an error generating the heroes.",
        Endpoint::Story => "There was an error generating the story.",
        Endpoint::Scrape => "There was an error fetching the page.",
    }
}

/// Status shown when a reply parses to no selectable candidates.
pub fn empty_list_status_text(kind: CandidateKind) -> &'static str {
    match kind {
        CandidateKind::Villain => "There were no villains to choose from.",
        CandidateKind::Hero => "There were no heroes to choose from.",
    }
}

/// Drives one [`Session`] from `Idle` to `StoryReady` or `Failed`.
///
/// Every handler checks the current stage first and returns a protocol
/// violation, leaving the session untouched, when invoked out of order.
/// Request failures are not errors at this level: they move the session to
/// `Failed`, surface through the presenter, and the handler returns
/// `Ok(Stage::Failed)`.
///
/// Requests are issued one at a time; the controller never has two in
/// flight and never retries.
#[derive(Debug)]
pub struct StageController<S, P, M> {
    service: S,
    presenter: P,
    modal: M,
    config: WorkflowConfig,
    session: Session,
    pending: Option<CandidateList>,
    cycle: u64,
}

impl<S, P, M> StageController<S, P, M>
where
    S: StoryService,
    P: Presenter,
    M: StoryModal,
{
    /// New controller with a fresh session.
    pub fn new(service: S, presenter: P, modal: M, config: WorkflowConfig) -> Self {
        Self {
            service,
            presenter,
            modal,
            config,
            session: Session::new(),
            pending: None,
            cycle: 0,
        }
    }

    /// Session state so far.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Candidate list awaiting a pick, if any.
    pub fn pending(&self) -> Option<&CandidateList> {
        self.pending.as_ref()
    }

    /// Generation service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Presenter.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Story modal.
    pub fn modal(&self) -> &M {
        &self.modal
    }

    /// Story modal, for dismissal by the front end.
    pub fn modal_mut(&mut self) -> &mut M {
        &mut self.modal
    }

    /// Workflow settings.
    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Tear down into the session and the presentation halves.
    pub fn into_parts(self) -> (Session, P, M) {
        (self.session, self.presenter, self.modal)
    }

    /// Request the summary, hold it on screen, then request villains.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> CuentosResult<Stage> {
        self.session.require(Stage::Idle, "start")?;
        self.session.advance(Stage::AwaitingSummary)?;
        self.presenter.show_status(GENERATING_SUMMARY);

        let reply = self.service.summary(&SummaryRequest {}).await;
        let Some(summary) = self.settle(Endpoint::Summary, reply)? else {
            return Ok(Stage::Failed);
        };
        self.session.record_summary(summary.as_str())?;
        self.presenter.show_status(&summary);

        let delay = self.config.summary_delay();
        debug!(delay_ms = delay.as_millis() as u64, "Holding summary on screen");
        tokio::time::sleep(delay).await;
        self.presenter.show_status("");

        self.session.advance(Stage::AwaitingVillains)?;
        let request = VillainsRequest { resumen: summary };
        let reply = self.service.villains(&request).await;
        match self.settle(Endpoint::Villains, reply)? {
            Some(raw) => self.on_villains_received(&raw),
            None => Ok(Stage::Failed),
        }
    }

    /// Render the villain list and wait for a pick.
    #[instrument(skip(self, raw), fields(len = raw.len()))]
    pub fn on_villains_received(&mut self, raw: &str) -> CuentosResult<Stage> {
        self.session
            .require(Stage::AwaitingVillains, "on_villains_received")?;
        if !self.render(CandidateKind::Villain, raw) {
            let text = empty_list_status_text(CandidateKind::Villain);
            self.fail_with(StageFailure::transport(text))?;
            return Ok(self.session.stage());
        }
        self.session.advance(Stage::VillainSelectionPending)?;
        Ok(self.session.stage())
    }

    /// Record the villain and request heroes for it.
    #[instrument(skip(self))]
    pub async fn on_villain_selected(&mut self, candidate: &str) -> CuentosResult<Stage> {
        self.session
            .require(Stage::VillainSelectionPending, "on_villain_selected")?;
        self.session.record_villain(candidate)?;
        self.pending = None;
        self.presenter
            .announce_selection(CandidateKind::Villain, candidate);
        self.session.advance(Stage::AwaitingHeroes)?;

        let request = HeroesRequest {
            resumen: self.session.require_summary()?.to_string(),
            villano: self.session.require_villain()?.to_string(),
        };
        let reply = self.service.heroes(&request).await;
        match self.settle(Endpoint::Heroes, reply)? {
            Some(raw) => self.on_heroes_received(&raw),
            None => Ok(Stage::Failed),
        }
    }

    /// Render the hero list and wait for a pick.
    #[instrument(skip(self, raw), fields(len = raw.len()))]
    pub fn on_heroes_received(&mut self, raw: &str) -> CuentosResult<Stage> {
        self.session
            .require(Stage::AwaitingHeroes, "on_heroes_received")?;
        if !self.render(CandidateKind::Hero, raw) {
            let text = empty_list_status_text(CandidateKind::Hero);
            self.fail_with(StageFailure::transport(text))?;
            return Ok(self.session.stage());
        }
        self.session.advance(Stage::HeroSelectionPending)?;
        Ok(self.session.stage())
    }

    /// Record the hero and request the story.
    #[instrument(skip(self))]
    pub async fn on_hero_selected(&mut self, candidate: &str) -> CuentosResult<Stage> {
        self.session
            .require(Stage::HeroSelectionPending, "on_hero_selected")?;
        self.session.record_hero(candidate)?;
        self.pending = None;
        self.presenter
            .announce_selection(CandidateKind::Hero, candidate);
        self.session.advance(Stage::AwaitingStory)?;

        let request = self.session.story_inputs()?.to_request();
        let reply = self.service.story(&request).await;
        match self.settle(Endpoint::Story, reply)? {
            Some(story) => self.on_story_received(&story),
            None => Ok(Stage::Failed),
        }
    }

    /// Record the story and hand it to the modal.
    #[instrument(skip(self, text), fields(len = text.len()))]
    pub fn on_story_received(&mut self, text: &str) -> CuentosResult<Stage> {
        self.session
            .require(Stage::AwaitingStory, "on_story_received")?;
        self.session.record_story(text)?;
        self.session.advance(Stage::StoryReady)?;
        self.modal.present(text, self.config.audio_track());
        Ok(Stage::StoryReady)
    }

    /// Resolve a pick against the pending list and dispatch it.
    #[instrument(skip(self))]
    pub async fn pick(&mut self, cycle: u64, index: usize) -> CuentosResult<Stage> {
        let Some(list) = self.pending.as_ref() else {
            return Err(ProtocolError::new(ProtocolErrorKind::StageMismatch {
                operation: "pick".to_string(),
                expected: "a selection stage".to_string(),
                actual: self.session.stage().to_string(),
            })
            .into());
        };
        if *list.cycle() != cycle {
            return Err(ProtocolError::new(ProtocolErrorKind::StaleCycle {
                got: cycle,
                current: *list.cycle(),
            })
            .into());
        }
        let kind = *list.kind();
        let candidate = list
            .get(index)
            .ok_or_else(|| ProtocolError::new(ProtocolErrorKind::UnknownCandidate(index)))?
            .text()
            .clone();

        match kind {
            CandidateKind::Villain => self.on_villain_selected(&candidate).await,
            CandidateKind::Hero => self.on_hero_selected(&candidate).await,
        }
    }

    /// Run a whole workflow, taking picks from `actions`.
    ///
    /// Returns the last stage reached. If the channel closes first, that is
    /// whatever selection stage the session was waiting in.
    #[instrument(skip(self, actions))]
    pub async fn drive(
        &mut self,
        mut actions: mpsc::UnboundedReceiver<UserAction>,
    ) -> CuentosResult<Stage> {
        let mut stage = self.start().await?;
        while !stage.is_terminal() {
            match actions.recv().await {
                Some(UserAction::Pick { cycle, index }) => {
                    stage = self.pick(cycle, index).await?;
                }
                None => {
                    info!(%stage, "Action channel closed before the workflow finished");
                    break;
                }
            }
        }
        Ok(stage)
    }

    /// Parse and show a candidate list. Returns false when nothing is left
    /// to pick from, leaving the region untouched.
    fn render(&mut self, kind: CandidateKind, raw: &str) -> bool {
        self.cycle += 1;
        let list = CandidateList::parse(kind, self.cycle, raw, self.config.candidate_filter());
        debug!(%kind, cycle = self.cycle, count = list.len(), "Candidates parsed");
        if list.is_empty() {
            warn!(%kind, cycle = self.cycle, "No candidates to choose from");
            return false;
        }
        self.presenter.render_candidates(&list);
        self.pending = Some(list);
        true
    }

    /// Unwrap a successful reply, or fail the session and surface why.
    fn settle(&mut self, endpoint: Endpoint, reply: ServiceReply) -> CuentosResult<Option<String>> {
        let failure = match reply {
            Ok(StageReply::Success(text)) => {
                debug!(%endpoint, len = text.len(), "Reply received");
                return Ok(Some(text));
            }
            Ok(StageReply::BusinessError(message)) => {
                let err = GenerationError::new(endpoint.path(), message);
                warn!(%err, "Service reported an error");
                StageFailure::business(&err)
            }
            Err(err) => {
                error!(%endpoint, %err, "Request failed");
                StageFailure::transport(transport_status_text(endpoint))
            }
        };
        self.fail_with(failure)?;
        Ok(None)
    }

    fn fail_with(&mut self, failure: StageFailure) -> CuentosResult<()> {
        self.presenter.show_status(failure.message());
        self.session.fail(failure)?;
        Ok(())
    }
}
