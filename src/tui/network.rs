use crate::client::ApiClient;
use crate::tui::action::{Action, AppEvent};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Runs requests until `Action::Quit` or the sender goes away.
///
/// Each request gets its own task so a slow one never holds up the next; the
/// pages sort out which answers still matter.
pub async fn run(
    client: ApiClient,
    mut actions: UnboundedReceiver<Action>,
    events: UnboundedSender<AppEvent>,
) {
    log::info!("Network worker started for {}", client.base_url());
    while let Some(action) = actions.recv().await {
        match action {
            Action::Fetch(request) => {
                let client = client.clone();
                let events = events.clone();
                tokio::spawn(async move {
                    let response = request.execute(&client).await;
                    // The UI may have quit in the meantime.
                    let _ = events.send(AppEvent::Response(response));
                });
            }
            Action::Quit => break,
        }
    }
    log::info!("Network worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StatusFilter;
    use crate::pages::{Response, ShowsPage};
    use mockito::Server;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn executes_requests_and_reports_back() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/shows?status=upcoming")
            .with_status(200)
            .with_body(r#"[{"id": 1, "title": "Open Mic", "location": "Basement"}]"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url(), false).unwrap();
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run(client, action_rx, event_tx));

        let (mut page, req) = ShowsPage::mount(StatusFilter::Upcoming);
        let sent = req.ticket();
        action_tx.send(Action::Fetch(req)).unwrap();

        let AppEvent::Response(response) = event_rx.recv().await.unwrap();
        assert_eq!(response.ticket(), sent);
        let Response::Shows(ticket, result) = response else {
            panic!("expected a shows response");
        };
        assert!(page.apply(ticket, result));
        assert_eq!(page.selected_show().map(|s| s.id), Some(1));

        action_tx.send(Action::Quit).unwrap();
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn worker_stops_when_sender_drops() {
        let client = ApiClient::new("http://localhost:8000", false).unwrap();
        let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();
        let (event_tx, _event_rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run(client, action_rx, event_tx));
        drop(action_tx);
        worker.await.unwrap();
    }
}
