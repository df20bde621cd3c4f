use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::anyhow;
use crossterm::event::{self, Event, KeyEvent};

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick(Instant),
    Resize(u16, u16),
}

/// Terminal events from a reader thread, plus ticks that only fire when requested.
///
/// A tick is armed by `schedule_tick(true)` after each processed event; once it fires
/// it has to be requested again, so a finished session stops ticking on its own.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    tick_rate: Duration,
    next_tick: Option<Instant>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            loop {
                let sent = match event::read() {
                    Ok(Event::Key(key)) => tx.send(AppEvent::Key(key)),
                    Ok(Event::Resize(w, h)) => tx.send(AppEvent::Resize(w, h)),
                    Ok(_) => Ok(()),
                    Err(err) => {
                        tracing::warn!(%err, "terminal event read failed");
                        return;
                    }
                };
                if sent.is_err() {
                    return;
                }
            }
        });

        Self::with_receiver(rx, tick_rate)
    }

    fn with_receiver(rx: mpsc::Receiver<AppEvent>, tick_rate: Duration) -> Self {
        Self {
            rx,
            tick_rate,
            next_tick: None,
        }
    }

    /// Arms the next tick (keeping an already armed deadline) or disarms it.
    pub fn schedule_tick(&mut self, requested: bool, now: Instant) {
        if !requested {
            self.next_tick = None;
        } else if self.next_tick.is_none() {
            self.next_tick = Some(now + self.tick_rate);
        }
    }

    pub fn tick_pending(&self) -> bool {
        self.next_tick.is_some()
    }

    pub fn next(&mut self) -> anyhow::Result<AppEvent> {
        let Some(deadline) = self.next_tick else {
            return Ok(self.rx.recv()?);
        };
        let wait = deadline.saturating_duration_since(Instant::now());
        match self.rx.recv_timeout(wait) {
            Ok(event) => Ok(event),
            Err(RecvTimeoutError::Timeout) => {
                self.next_tick = None;
                Ok(AppEvent::Tick(Instant::now()))
            }
            Err(RecvTimeoutError::Disconnected) => Err(anyhow!("terminal event reader stopped")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_fires_only_when_requested() {
        let (tx, rx) = mpsc::channel();
        let mut events = EventHandler::with_receiver(rx, Duration::from_millis(5));
        assert!(!events.tick_pending());

        events.schedule_tick(true, Instant::now());
        assert!(matches!(events.next().unwrap(), AppEvent::Tick(_)));
        // a fired tick is not re-armed implicitly
        assert!(!events.tick_pending());

        tx.send(AppEvent::Resize(80, 24)).unwrap();
        assert!(matches!(events.next().unwrap(), AppEvent::Resize(80, 24)));
    }

    #[test]
    fn test_pending_input_beats_tick() {
        let (tx, rx) = mpsc::channel();
        let mut events = EventHandler::with_receiver(rx, Duration::from_secs(60));
        events.schedule_tick(true, Instant::now());
        tx.send(AppEvent::Resize(100, 30)).unwrap();
        assert!(matches!(events.next().unwrap(), AppEvent::Resize(100, 30)));
        assert!(events.tick_pending());
    }

    #[test]
    fn test_rescheduling_keeps_deadline() {
        let (_tx, rx) = mpsc::channel();
        let mut events = EventHandler::with_receiver(rx, Duration::from_millis(100));
        let t0 = Instant::now();
        events.schedule_tick(true, t0);
        events.schedule_tick(true, t0 + Duration::from_millis(50));
        assert_eq!(events.next_tick, Some(t0 + Duration::from_millis(100)));
        events.schedule_tick(false, t0);
        assert!(!events.tick_pending());
    }

    #[test]
    fn test_disconnected_reader_is_an_error() {
        let (tx, rx) = mpsc::channel::<AppEvent>();
        drop(tx);
        let mut events = EventHandler::with_receiver(rx, Duration::from_millis(1));
        assert!(events.next().is_err());
    }
}
