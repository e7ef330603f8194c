use tracing::{debug, info};

use crate::{
    dto::chat::InboundChatMessage,
    services::{
        command::{ChatCommand, ParsedMessage, parse_message},
        sse_events,
    },
    state::{SharedState, registry::MatchRef},
};

/// Run one relayed chat message through the bot and return the reply to post,
/// if any.
///
/// Text that is not a known command yields `None`; every recognised command
/// yields exactly one reply.
pub async fn handle_message(state: &SharedState, message: &InboundChatMessage) -> Option<String> {
    let InboundChatMessage { sender, chat, text } = message;

    let command = match parse_message(text, state.config().command_prefix()) {
        ParsedMessage::Ignored => {
            debug!(%chat, "ignoring non-command message");
            return None;
        }
        ParsedMessage::Malformed(kind) => {
            info!(%sender, %chat, command = ?kind, "command missing arguments");
            return Some(state.presenter().render_usage(kind));
        }
        ParsedMessage::Command(command) => command,
    };

    info!(%sender, %chat, command = ?command, "command received");
    Some(execute(state, sender, chat, command).await)
}

async fn execute(state: &SharedState, sender: &str, chat: &str, command: ChatCommand) -> String {
    let registry = state.registry();
    let presenter = state.presenter();

    match command {
        ChatCommand::CreateMatch { date, time } => {
            let roster = registry.create(sender, &date, &time, chat);
            info!(match_id = %roster.id(), creator = %sender, "match created");
            sse_events::broadcast_match_created(state, &roster);
            presenter.render_roster(&roster)
        }
        ChatCommand::ListMatches => {
            let rosters = registry.list_by_chat(chat).await;
            presenter.render_listing(&rosters)
        }
        ChatCommand::Join { match_id } => {
            match registry.join(MatchRef::in_chat(&match_id, chat), sender).await {
                Ok((outcome, roster)) => {
                    if outcome.is_success() {
                        info!(%match_id, player = %sender, outcome = ?outcome, "player joined");
                        sse_events::broadcast_match_updated(state, &roster);
                    }
                    presenter.render_join(&outcome, &roster)
                }
                Err(_) => presenter.render_join_not_found(),
            }
        }
        ChatCommand::Leave { match_id } => {
            match registry.leave(MatchRef::in_chat(&match_id, chat), sender).await {
                Ok((outcome, roster)) => {
                    if outcome.is_success() {
                        info!(%match_id, player = %sender, outcome = ?outcome, "player left");
                        sse_events::broadcast_match_updated(state, &roster);
                    }
                    presenter.render_leave(sender, &outcome, &roster)
                }
                Err(_) => presenter.render_not_found(),
            }
        }
        ChatCommand::Cancel { match_id } => {
            let result = registry
                .cancel(MatchRef::in_chat(&match_id, chat), sender)
                .await;
            if let Ok(roster) = &result {
                info!(%match_id, requester = %sender, "match cancelled");
                sse_events::broadcast_match_cancelled(state, roster);
            }
            presenter.render_cancel(&result, sender)
        }
        ChatCommand::Help => presenter.render_help(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, state::AppState};

    fn message(sender: &str, chat: &str, text: &str) -> InboundChatMessage {
        InboundChatMessage {
            sender: sender.into(),
            chat: chat.into(),
            text: text.into(),
        }
    }

    async fn send(state: &SharedState, sender: &str, text: &str) -> Option<String> {
        handle_message(state, &message(sender, "chat-a", text)).await
    }

    async fn create(state: &SharedState, sender: &str) -> String {
        send(state, sender, "/padel 12/08 18h").await.unwrap();
        let rosters = state.registry().list_by_chat("chat-a").await;
        rosters.last().unwrap().id().to_owned()
    }

    #[tokio::test]
    async fn chatter_and_unknown_commands_get_no_reply() {
        let state = AppState::new(AppConfig::default());
        assert_eq!(send(&state, "U1", "salut tout le monde").await, None);
        assert_eq!(send(&state, "U1", "/tennis 12/08 18h").await, None);
        assert!(state.registry().is_empty());
    }

    #[tokio::test]
    async fn malformed_create_replies_usage_and_creates_nothing() {
        let state = AppState::new(AppConfig::default());
        let reply = send(&state, "U1", "/padel 12/08").await.unwrap();
        assert!(reply.starts_with("❌ Format: /padel [date] [heure]"));
        assert!(state.registry().is_empty());
    }

    #[tokio::test]
    async fn create_replies_with_rendered_roster() {
        let state = AppState::new(AppConfig::default());
        let reply = send(&state, "U1", "/padel 12/08 18h").await.unwrap();
        let id = state.registry().list_by_chat("chat-a").await[0].id().to_owned();

        assert!(reply.contains("📅 12/08 à 18h"));
        assert!(reply.contains(&format!("🆔 ID: {id}")));
        assert!(reply.contains("1. U1\n2. _[place libre]_"));
    }

    #[tokio::test]
    async fn join_reports_each_outcome() {
        let state = AppState::new(AppConfig::default());
        let id = create(&state, "U1").await;

        let admitted = send(&state, "U2", &format!("/rj {id}")).await.unwrap();
        assert!(admitted.starts_with("✅ Inscrit au match !"));

        let again = send(&state, "U2", &format!("/rj {id}")).await.unwrap();
        assert_eq!(again, "❌ Tu es déjà inscrit !");

        send(&state, "U3", &format!("/rj {id}")).await;
        send(&state, "U4", &format!("/rj {id}")).await;
        let waitlisted = send(&state, "U5", &format!("/join {id}")).await.unwrap();
        assert!(waitlisted.starts_with("✅ Ajouté à la liste d'attente (position 1)"));
        assert!(waitlisted.ends_with("✅ *COMPLET !*"));

        let twice = send(&state, "U5", &format!("/rj {id}")).await.unwrap();
        assert_eq!(twice, "❌ Déjà en liste d'attente");

        let missing = send(&state, "U5", "/rj 99999").await.unwrap();
        assert!(missing.starts_with("❌ Match introuvable. Vérifie l'ID"));
    }

    #[tokio::test]
    async fn leave_announces_promotion() {
        let state = AppState::new(AppConfig::default());
        let id = create(&state, "U1").await;
        for user in ["U2", "U3", "U4", "U5"] {
            send(&state, user, &format!("/rj {id}")).await;
        }

        let reply = send(&state, "U2", &format!("/quitter {id}")).await.unwrap();
        assert!(reply.starts_with("👋 U2 a quitté. U5 a été promu !"));

        let stranger = send(&state, "U9", &format!("/quitter {id}")).await.unwrap();
        assert_eq!(stranger, "❌ Tu n'es pas inscrit à ce match");
    }

    #[tokio::test]
    async fn cancel_is_reserved_to_creator() {
        let state = AppState::new(AppConfig::default());
        let id = create(&state, "U1").await;

        let denied = send(&state, "U2", &format!("/annuler {id}")).await.unwrap();
        assert_eq!(denied, "❌ Seul le créateur peut annuler le match");
        assert!(state.registry().get(id.as_str()).await.is_some());

        let done = send(&state, "U1", &format!("/annuler {id}")).await.unwrap();
        assert_eq!(done, format!("❌ Match {id} annulé par U1"));
        assert!(state.registry().get(id.as_str()).await.is_none());

        let gone = send(&state, "U1", &format!("/annuler {id}")).await.unwrap();
        assert_eq!(gone, "❌ Match introuvable");
    }

    #[tokio::test]
    async fn matches_are_invisible_from_other_chats() {
        let state = AppState::new(AppConfig::default());
        let id = create(&state, "U1").await;

        let elsewhere = handle_message(&state, &message("U2", "chat-b", &format!("/rj {id}")))
            .await
            .unwrap();
        assert!(elsewhere.starts_with("❌ Match introuvable"));

        let listing = handle_message(&state, &message("U2", "chat-b", "/liste"))
            .await
            .unwrap();
        assert!(listing.starts_with("📋 Aucun match programmé"));
    }

    #[tokio::test]
    async fn list_and_help_are_answered() {
        let state = AppState::new(AppConfig::default());
        let id = create(&state, "U1").await;

        let listing = send(&state, "U2", "/LISTE").await.unwrap();
        assert!(listing.contains(&format!("• 12/08 18h (1/4)\n  ID: {id}")));

        let help = send(&state, "U2", "/help").await.unwrap();
        assert_eq!(help, state.presenter().render_help());
    }

    #[tokio::test]
    async fn mutations_are_broadcast() {
        let state = AppState::new(AppConfig::default());
        let mut events = state.match_events().subscribe();

        let id = create(&state, "U1").await;
        send(&state, "U2", &format!("/rj {id}")).await;
        send(&state, "U2", &format!("/rj {id}")).await;
        send(&state, "U1", &format!("/annuler {id}")).await;

        let received: Vec<_> = std::iter::from_fn(|| events.try_recv().ok()).collect();
        let names: Vec<Option<String>> = received.iter().map(|event| event.event.clone()).collect();
        assert_eq!(
            names,
            [
                Some("match.created".to_string()),
                Some("match.updated".to_string()),
                Some("match.cancelled".to_string()),
            ]
        );

        let revisions: Vec<u64> = received
            .iter()
            .map(|event| {
                let payload: serde_json::Value = serde_json::from_str(&event.data).unwrap();
                payload["revision"].as_u64().unwrap()
            })
            .collect();
        assert_eq!(revisions, [0, 1, 2]);
    }
}
