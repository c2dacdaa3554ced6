//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use feed_playback::admission::{AdmissionEvent, NoopObserver};
use feed_playback::player::{ElementSnapshot, MediaPlayer, PlayerState};
use feed_playback::{ElementHandle, FeedConfig, FeedCoordinator, ItemId, PlaybackError};
use tokio::sync::mpsc;

static TRACING: Once = Once::new();

/// Install a test subscriber honouring RUST_LOG
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[derive(Debug)]
struct State {
    playing: bool,
    muted: bool,
    element: Option<ElementSnapshot>,
    failures: usize,
    destroyed: bool,
}

/// Minimal player double
#[derive(Debug)]
pub struct TestPlayer {
    state: Mutex<State>,
}

impl TestPlayer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State {
                playing: false,
                muted: true,
                element: Some(ElementSnapshot {
                    paused: true,
                    ended: false,
                    ready_state: 4,
                }),
                failures: 0,
                destroyed: false,
            }),
        })
    }

    pub fn playing() -> Arc<Self> {
        let player = Self::new();
        player.set_playing(true);
        player
    }

    pub fn set_playing(&self, playing: bool) {
        let mut state = self.state.lock().unwrap();
        state.playing = playing;
        if let Some(el) = state.element.as_mut() {
            el.paused = !playing;
        }
    }

    /// Element running, play() promise not settled yet
    pub fn set_racing(&self) {
        let mut state = self.state.lock().unwrap();
        state.playing = false;
        state.element = Some(ElementSnapshot {
            paused: false,
            ended: false,
            ready_state: 2,
        });
    }

    pub fn fail_plays(&self, count: usize) {
        self.state.lock().unwrap().failures = count;
    }

    pub fn is_muted(&self) -> bool {
        self.state.lock().unwrap().muted
    }
}

#[async_trait]
impl MediaPlayer for TestPlayer {
    async fn play(&self) -> Result<(), PlaybackError> {
        let mut state = self.state.lock().unwrap();
        if state.destroyed {
            return Err(PlaybackError::Detached);
        }
        if state.failures > 0 {
            state.failures -= 1;
            return Err(PlaybackError::NotAllowed("user gesture required".into()));
        }
        state.playing = true;
        if let Some(el) = state.element.as_mut() {
            el.paused = false;
        }
        Ok(())
    }

    fn pause(&self) {
        self.set_playing(false);
    }

    fn is_playing(&self) -> bool {
        self.state.lock().unwrap().playing
    }

    fn set_muted(&self, muted: bool) {
        self.state.lock().unwrap().muted = muted;
    }

    fn video_element(&self) -> Option<ElementSnapshot> {
        self.state.lock().unwrap().element
    }

    fn state(&self) -> PlayerState {
        let state = self.state.lock().unwrap();
        PlayerState {
            duration: Some(30.0),
            is_playing: state.playing,
            muted: state.muted,
        }
    }

    fn destroy(&self) {
        let mut state = self.state.lock().unwrap();
        state.destroyed = true;
        state.playing = false;
        state.element = None;
    }
}

/// A feed plus the players mounted in it
pub struct Harness {
    pub feed: Arc<FeedCoordinator>,
    pub events: Option<mpsc::Receiver<AdmissionEvent>>,
    pub players: Vec<(ItemId, Arc<TestPlayer>)>,
}

impl Harness {
    pub fn new(config: FeedConfig) -> Self {
        init_tracing();
        let (feed, events) = FeedCoordinator::new(config, Arc::new(NoopObserver));
        Self {
            feed: Arc::new(feed),
            events: Some(events),
            players: Vec::new(),
        }
    }

    /// Observe and register a player under element token `n`
    pub async fn mount(&mut self, n: u64, player: Arc<TestPlayer>) -> ItemId {
        let id = ItemId::new(format!("post-{}", n));
        self.feed.observe(ElementHandle::new(n), id.clone()).await;
        self.feed
            .register_player(&id, Arc::clone(&player) as Arc<dyn MediaPlayer>)
            .await;
        self.players.push((id.clone(), player));
        id
    }

    pub fn player(&self, id: &ItemId) -> &Arc<TestPlayer> {
        &self
            .players
            .iter()
            .find(|(pid, _)| pid == id)
            .expect("unknown player")
            .1
    }

    /// Check the mute invariants against the arbiter's view
    pub async fn assert_mute_invariants(&self) {
        let snapshot = self.feed.focus_snapshot().await;
        let unmuted: Vec<_> = self
            .players
            .iter()
            .filter(|(_, p)| !p.is_muted())
            .map(|(id, _)| id.clone())
            .collect();

        if snapshot.global_mute {
            assert!(unmuted.is_empty(), "unmuted under global mute: {:?}", unmuted);
        } else {
            assert!(unmuted.len() <= 1, "more than one unmuted: {:?}", unmuted);
            if let Some(id) = unmuted.first() {
                assert_eq!(Some(id), snapshot.owner.as_ref());
            }
        }

        assert_eq!(
            snapshot.owner.is_none(),
            snapshot.priority == feed_playback::AudioPriority::None
        );
    }
}
