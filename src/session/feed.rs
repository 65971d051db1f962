//! Rolling feed of recent market events shown beside the play area.

use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedLine {
    pub text: String,
    /// Ticks until this line expires.
    pub ticks_left: u32,
}

/// Bounded, newest-last list of event lines. Adding to a full feed evicts
/// the oldest line; lines also expire on their own after `ttl_ticks`.
#[derive(Debug, Clone)]
pub struct EventFeed {
    max: usize,
    ttl_ticks: u32,
    lines: VecDeque<FeedLine>,
}

impl EventFeed {
    pub fn new(max: usize, ttl_ticks: u32) -> Self {
        Self {
            max,
            ttl_ticks,
            lines: VecDeque::new(),
        }
    }

    pub fn add(&mut self, text: impl Into<String>) {
        if self.max == 0 {
            return;
        }
        while self.lines.len() >= self.max {
            self.lines.pop_front();
        }
        self.lines.push_back(FeedLine {
            text: text.into(),
            ticks_left: self.ttl_ticks,
        });
    }

    /// Age every line by one tick and drop the expired ones.
    /// Returns how many were dropped.
    pub fn advance(&mut self) -> usize {
        let before = self.lines.len();
        for line in &mut self.lines {
            line.ticks_left = line.ticks_left.saturating_sub(1);
        }
        self.lines.retain(|line| line.ticks_left > 0);
        before - self.lines.len()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines from oldest to newest.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.text.as_str())
    }
}
