use tokio::sync::mpsc;

use depthview::DepthviewError;
use depthview::config::fetch_config;
use depthview::tui::{
    self, App, Event, Message,
    event::{spawn_event_reader, spawn_tick_timer, update},
    restore_terminal, setup_terminal,
};
use depthview::view::OrderBookView;
use depthview::websocket::ConnectionManager;

#[tokio::main]
async fn main() -> Result<(), DepthviewError> {
    // Logs go to stderr; stdout belongs to the TUI.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let config = fetch_config()?;
    let url = config.feed.feed_url();

    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    tokio::spawn(ConnectionManager::new(url, tx.clone()).run());
    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx, 250);

    let mut terminal = setup_terminal()?;
    let mut view = OrderBookView::with_trade_capacity(config.trade_capacity);
    let mut app = App::new(config.feed.pair_label());

    let result = run_loop(&mut terminal, &mut app, &mut view, &mut rx).await;

    restore_terminal(&mut terminal)?;
    result
}

/// Drives the main message loop until quit or terminal failure.
async fn run_loop(
    terminal: &mut tui::Tui,
    app: &mut App,
    view: &mut OrderBookView,
    rx: &mut mpsc::UnboundedReceiver<Message>,
) -> Result<(), DepthviewError> {
    while let Some(message) = rx.recv().await {
        let redraw = matches!(
            message,
            Message::Input(Event::Tick) | Message::Input(Event::Resize(_, _))
        );
        update(app, view, message);

        if app.should_quit {
            break;
        }
        if redraw {
            terminal
                .draw(|frame| tui::render(frame, app))
                .map_err(|e| DepthviewError::Io(e.to_string()))?;
        }
    }

    Ok(())
}
