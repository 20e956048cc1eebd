// src/narration.rs

//! Pronunciation playback for the learning view.
//!
//! Speech is asynchronous on the presentation side, so the queue is driven
//! cooperatively: the embedder calls [`NarrationQueue::advance`] whenever the
//! previous utterance has finished (or its pause has elapsed). Switching items
//! or tearing the view down cancels everything still queued.

use crate::constants::{NARRATION_PAUSE_MS, NARRATION_REPEAT};
use crate::models::Item;
use log::debug;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    /// Silence to leave after this utterance before the next one starts.
    pub pause_after: Duration,
}

/// Audio seam implemented by the presentation layer.
pub trait Speaker {
    fn speak(&mut self, utterance: &Utterance);
    fn stop(&mut self);
}

/// Shared flag checked between steps. Cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// "meaning sound" three times, then each example word once.
pub fn script_for(item: &Item) -> Vec<Utterance> {
    let pause = Duration::from_millis(NARRATION_PAUSE_MS);
    let mut steps: Vec<Utterance> = (0..NARRATION_REPEAT)
        .map(|i| Utterance {
            text: item.reading(),
            pause_after: if i + 1 < NARRATION_REPEAT {
                pause
            } else {
                Duration::ZERO
            },
        })
        .collect();
    steps.push(Utterance {
        text: item.word1.clone(),
        pause_after: Duration::ZERO,
    });
    steps.push(Utterance {
        text: item.word2.clone(),
        pause_after: Duration::ZERO,
    });
    steps
}

#[derive(Debug, Default)]
pub struct NarrationQueue {
    pending: VecDeque<Utterance>,
    token: CancelToken,
    item_id: Option<u32>,
}

impl NarrationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels whatever is playing and queues `item`'s script. Returns the
    /// token for this playback so the caller can check it from callbacks.
    pub fn play<S: Speaker + ?Sized>(&mut self, item: &Item, speaker: &mut S) -> CancelToken {
        self.cancel(speaker);
        self.token = CancelToken::default();
        self.pending = script_for(item).into();
        self.item_id = Some(item.id);
        debug!("Narration queued for item {} ({} steps)", item.id, self.pending.len());
        self.advance(speaker);
        self.token.clone()
    }

    /// Speaks the next queued utterance. Returns false when nothing was spoken.
    pub fn advance<S: Speaker + ?Sized>(&mut self, speaker: &mut S) -> bool {
        if self.token.is_cancelled() {
            self.pending.clear();
            return false;
        }
        match self.pending.pop_front() {
            Some(utterance) => {
                speaker.speak(&utterance);
                true
            }
            None => {
                self.item_id = None;
                false
            }
        }
    }

    pub fn cancel<S: Speaker + ?Sized>(&mut self, speaker: &mut S) {
        if self.is_playing() {
            debug!("Narration cancelled for item {:?}", self.item_id);
        }
        self.token.cancel();
        self.pending.clear();
        self.item_id = None;
        speaker.stop();
    }

    pub fn is_playing(&self) -> bool {
        self.item_id.is_some()
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}
