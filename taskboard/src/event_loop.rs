//! The main event loop.
//!
//! Terminal events and animation ticks are multiplexed with
//! `tokio::select!`; each is applied to [`App`] to completion before the
//! next frame is drawn.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::Event;
use futures_util::{Stream, StreamExt};
use ratatui::{Terminal, backend::Backend};
use tokio::time::MissedTickBehavior;

use crate::app::App;
use crate::ui;

/// Draw, wait for the next event or tick, apply it; repeat until the app
/// asks to quit or `events` ends.
///
/// # Errors
///
/// Returns the first I/O error from drawing or from the event stream.
pub async fn run<B, S>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut events: S,
    tick_interval: Duration,
) -> io::Result<()>
where
    B: Backend,
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    let mut ticker = tokio::time::interval(tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        terminal.draw(|frame| {
            app.set_viewport(frame.area());
            ui::draw(frame, app);
        })?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(event)) => app.handle_event(&event, Instant::now()),
                Some(Err(e)) => {
                    tracing::error!(error = %e, "terminal event stream failed");
                    return Err(e);
                }
                None => {
                    tracing::debug!("terminal event stream closed");
                    return Ok(());
                }
            },
            _ = ticker.tick() => {
                app.tick(Instant::now());
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
