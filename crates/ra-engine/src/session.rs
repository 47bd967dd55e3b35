//! A single playthrough of a story.

use std::collections::BTreeMap;
use std::mem;
use std::sync::Arc;

use ra_core::{Item, Scene, SceneId, Story};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::{PlayerIdentity, SessionConfig};
use crate::effect::{Effect, Transcript, Turn};
use crate::error::EngineResult;
use crate::machine::{self, Event, State};
use crate::parser::ParsedCommand;
use crate::ports::{ScoreRecord, ScoreStore};

/// Called with the new tick count after every state change.
pub type TickSubscriber = Box<dyn FnMut(u64) + Send>;

/// A game session: the story being played, the player's progress, and the
/// output produced so far.
///
/// Every call goes through the state machine; a call with no transition from
/// the current state fails with [`crate::EngineError::Unsupported`].
pub struct Session {
    story: Story,
    player: Option<PlayerIdentity>,
    store: Arc<dyn ScoreStore>,
    state: State,
    scenes: Vec<Scene>,
    current: usize,
    inventory: BTreeMap<String, Item>,
    score: i64,
    story_title: String,
    output: Transcript,
    effects: Vec<Effect>,
    subscribers: Vec<TickSubscriber>,
    tick: u64,
    pending_saves: Vec<JoinHandle<()>>,
}

impl Session {
    /// Create a session. It waits in [`State::PoweredOn`] until
    /// [`Session::power_on`] is called.
    pub fn new(config: SessionConfig, store: Arc<dyn ScoreStore>) -> Self {
        Self {
            story: config.story,
            player: config.player,
            store,
            state: State::PoweredOn,
            scenes: Vec::new(),
            current: 0,
            inventory: BTreeMap::new(),
            score: 0,
            story_title: String::new(),
            output: Transcript::default(),
            effects: Vec::new(),
            subscribers: Vec::new(),
            tick: 0,
            pending_saves: Vec::new(),
        }
    }

    // -- Public API -----------------------------------------------------------

    /// Start a fresh run from the first scene. Calling this mid-game
    /// discards all progress.
    pub fn power_on(&mut self) -> EngineResult<Turn> {
        self.effects.clear();
        if self.state != State::PoweredOn {
            machine::handle(self, Event::PowerOff)?;
        }
        let command = machine::handle(self, Event::PowerOn)?;
        Ok(self.finish_turn(command))
    }

    /// Stop the run. Output and progress stay as they are until the next
    /// power-on.
    pub fn power_off(&mut self) -> EngineResult<Turn> {
        self.run(Event::PowerOff)
    }

    /// Parse and execute one line of player input.
    pub fn process_input(&mut self, input: &str) -> EngineResult<Turn> {
        self.run(Event::Input(input.to_string()))
    }

    /// Execute an already parsed command.
    pub fn process_player_command(&mut self, command: ParsedCommand) -> EngineResult<Turn> {
        self.run(Event::Command(command))
    }

    /// Register a callback invoked after every state change.
    pub fn subscribe(&mut self, subscriber: impl FnMut(u64) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Wait for every score save still in flight.
    pub async fn settle_pending_save(&mut self) {
        for handle in mem::take(&mut self.pending_saves) {
            if let Err(e) = handle.await {
                warn!(error = %e, "score save task did not finish");
            }
        }
    }

    // -- Accessors ------------------------------------------------------------

    /// The current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Number of state changes so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The story loaded on power-on.
    pub fn story(&self) -> &Story {
        &self.story
    }

    /// Title of the story in play; empty before the first power-on.
    pub fn story_title(&self) -> &str {
        &self.story_title
    }

    /// The signed-in player, if any.
    pub fn player(&self) -> Option<&PlayerIdentity> {
        self.player.as_ref()
    }

    /// The scene the player is in, once powered on.
    pub fn current_scene(&self) -> Option<&Scene> {
        self.scenes.get(self.current)
    }

    /// Items held, keyed by lower-cased name.
    pub fn inventory(&self) -> &BTreeMap<String, Item> {
        &self.inventory
    }

    /// The running score.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Everything currently on screen.
    pub fn transcript(&self) -> &Transcript {
        &self.output
    }

    /// Narrative lines.
    pub fn narrative_output(&self) -> &[String] {
        &self.output.narrative
    }

    /// Feedback lines.
    pub fn feedback_output(&self) -> &[String] {
        &self.output.feedback
    }

    /// The current prompt.
    pub fn player_prompt(&self) -> &str {
        &self.output.prompt
    }

    /// Has the game ended?
    pub fn is_game_over(&self) -> bool {
        self.output.game_over
    }

    // -- Machine hooks --------------------------------------------------------

    fn run(&mut self, event: Event) -> EngineResult<Turn> {
        self.effects.clear();
        let command = machine::handle(self, event)?;
        Ok(self.finish_turn(command))
    }

    fn finish_turn(&mut self, command: Option<ParsedCommand>) -> Turn {
        Turn {
            command,
            effects: mem::take(&mut self.effects),
        }
    }

    pub(crate) fn change_state(&mut self, next: State) {
        debug!(from = %self.state, to = %next, tick = self.tick + 1, "state change");
        self.state = next;
        self.tick += 1;
        let tick = self.tick;
        for subscriber in &mut self.subscribers {
            subscriber(tick);
        }
    }

    /// Reset progress and output for a new run.
    pub(crate) fn initialize(&mut self) {
        self.score = 0;
        self.inventory.clear();
        self.scenes = self.story.scenes().to_vec();
        self.current = 0;
        self.story_title = self.story.title().to_string();
        self.record(Effect::Reset);
    }

    pub(crate) fn enter_scene(&mut self, index: usize) {
        self.current = index;
    }

    /// The current scene. Only valid after power-on.
    pub(crate) fn scene(&self) -> &Scene {
        &self.scenes[self.current]
    }

    pub(crate) fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scenes[self.current]
    }

    pub(crate) fn scene_position(&self, id: &SceneId) -> Option<usize> {
        self.story.position(id)
    }

    pub(crate) fn add_points(&mut self, points: i64) {
        self.score += points;
    }

    /// Put a taken item in the inventory. Items sharing a name stack.
    pub(crate) fn stow(&mut self, item: Item) {
        let quantity = item.quantity;
        self.inventory
            .entry(item.name.to_lowercase())
            .and_modify(|held| held.quantity += quantity)
            .or_insert(item);
    }

    pub(crate) fn set_narrative_output(&mut self, lines: Vec<String>, clear: bool) {
        self.record(Effect::Narrative { lines, clear });
    }

    pub(crate) fn set_feedback_output(&mut self, lines: Vec<String>, clear: bool) {
        self.record(Effect::Feedback { lines, clear });
    }

    pub(crate) fn set_player_prompt(&mut self, prompt: impl Into<String>) {
        self.record(Effect::Prompt(prompt.into()));
    }

    pub(crate) fn mark_game_over(&mut self) {
        self.record(Effect::GameOver { score: self.score });
    }

    fn record(&mut self, effect: Effect) {
        self.output.apply(&effect);
        self.effects.push(effect);
    }

    /// Hand the final score to the store without waiting for it.
    pub(crate) fn save_score(&mut self) {
        let Some(player) = &self.player else {
            debug!("no player identity; score not saved");
            return;
        };
        let record = ScoreRecord::new(&self.story_title, self.score, player);

        let Ok(runtime) = Handle::try_current() else {
            warn!("no async runtime; score not saved");
            return;
        };
        let store = Arc::clone(&self.store);
        self.pending_saves.retain(|handle| !handle.is_finished());
        self.pending_saves.push(runtime.spawn(async move {
            let (title, score) = (record.story_title.clone(), record.score);
            match store.save(record).await {
                Ok(()) => info!(story = %title, score, "score saved"),
                Err(e) => warn!(error = %e, "failed to save score"),
            }
        }));
    }
}
