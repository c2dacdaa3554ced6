//! In-memory player double for unit tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::PlaybackError;
use crate::player::{ElementSnapshot, MediaPlayer, PlayerState};

#[derive(Debug)]
struct FakeState {
    playing: bool,
    muted: bool,
    duration: Option<f64>,
    element: Option<ElementSnapshot>,
    play_results: VecDeque<Result<(), PlaybackError>>,
    play_gates: VecDeque<Arc<Notify>>,
    play_calls: usize,
    pause_calls: usize,
    destroyed: bool,
}

/// Scripted player. `play()` succeeds unless a failure was queued.
#[derive(Debug)]
pub(crate) struct FakePlayer {
    state: Mutex<FakeState>,
}

impl FakePlayer {
    /// Paused, muted, metadata loaded
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                playing: false,
                muted: true,
                duration: Some(12.5),
                element: Some(ElementSnapshot {
                    paused: true,
                    ended: false,
                    ready_state: 4,
                }),
                play_results: VecDeque::new(),
                play_gates: VecDeque::new(),
                play_calls: 0,
                pause_calls: 0,
                destroyed: false,
            }),
        }
    }

    pub(crate) fn paused() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub(crate) fn playing() -> Arc<Self> {
        let player = Self::new();
        player.set_playing(true);
        Arc::new(player)
    }

    pub(crate) fn without_metadata() -> Arc<Self> {
        let player = Self::new();
        player.lock().duration = None;
        Arc::new(player)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub(crate) fn set_playing(&self, playing: bool) {
        let mut state = self.lock();
        state.playing = playing;
        if let Some(el) = state.element.as_mut() {
            el.paused = !playing;
        }
    }

    /// Element unpaused with metadata, but `play()` has not resolved yet
    pub(crate) fn set_element_racing(&self) {
        let mut state = self.lock();
        state.playing = false;
        state.element = Some(ElementSnapshot {
            paused: false,
            ended: false,
            ready_state: 1,
        });
    }

    pub(crate) fn fail_next_plays(&self, count: usize) {
        let mut state = self.lock();
        for _ in 0..count {
            state
                .play_results
                .push_back(Err(PlaybackError::NotAllowed("autoplay blocked".into())));
        }
    }

    /// Keep the next `play()` pending until the returned gate is notified
    pub(crate) fn hold_next_play(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.lock().play_gates.push_back(Arc::clone(&gate));
        gate
    }

    pub(crate) fn is_muted(&self) -> bool {
        self.lock().muted
    }

    pub(crate) fn play_calls(&self) -> usize {
        self.lock().play_calls
    }

    pub(crate) fn pause_calls(&self) -> usize {
        self.lock().pause_calls
    }

    pub(crate) fn is_destroyed(&self) -> bool {
        self.lock().destroyed
    }
}

#[async_trait]
impl MediaPlayer for FakePlayer {
    async fn play(&self) -> Result<(), PlaybackError> {
        let gate = {
            let mut state = self.lock();
            state.play_calls += 1;
            state.play_gates.pop_front()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let mut state = self.lock();
        if state.destroyed {
            return Err(PlaybackError::Detached);
        }
        let result = state.play_results.pop_front().unwrap_or(Ok(()));
        if result.is_ok() {
            state.playing = true;
            if let Some(el) = state.element.as_mut() {
                el.paused = false;
            }
        }
        result
    }

    fn pause(&self) {
        let mut state = self.lock();
        state.pause_calls += 1;
        state.playing = false;
        if let Some(el) = state.element.as_mut() {
            el.paused = true;
        }
    }

    fn is_playing(&self) -> bool {
        self.lock().playing
    }

    fn set_muted(&self, muted: bool) {
        self.lock().muted = muted;
    }

    fn video_element(&self) -> Option<ElementSnapshot> {
        self.lock().element
    }

    fn state(&self) -> PlayerState {
        let state = self.lock();
        PlayerState {
            duration: state.duration,
            is_playing: state.playing,
            muted: state.muted,
        }
    }

    fn destroy(&self) {
        let mut state = self.lock();
        state.destroyed = true;
        state.playing = false;
        state.element = None;
    }
}
