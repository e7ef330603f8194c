//! Text rendering of rosters, listings and command outcomes for chat replies.
//!
//! Chat clients render `*bold*` and `_italic_` markers, so they are part of the
//! fixed layouts below.

use std::fmt::Write;

use crate::{
    services::command::CommandKind,
    state::{
        registry::CancelError,
        roster::{JoinOutcome, LeaveOutcome, MatchRoster},
    },
};

const OPEN_SLOT: &str = "_[place libre]_";

/// Renders replies, advertising commands with the configured marker.
#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    prefix: char,
}

impl Presenter {
    /// Presenter advertising commands behind `prefix`.
    pub fn new(prefix: char) -> Self {
        Self { prefix }
    }

    fn command(&self, kind: CommandKind) -> String {
        format!("{}{}", self.prefix, kind.token())
    }

    /// Full card of a match: slots, waiting list and a closing status line.
    pub fn render_roster(&self, roster: &MatchRoster) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "🎾 *MATCH PADEL*");
        let _ = writeln!(out, "📅 {} à {}", roster.date(), roster.time());
        let _ = writeln!(out, "🆔 ID: {}", roster.id());
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "👥 *Joueurs ({}/{}):*",
            roster.participants().len(),
            roster.capacity()
        );

        let mut seated = roster.participants().iter();
        for slot in 1..=roster.capacity() {
            let occupant = seated.next().map(String::as_str).unwrap_or(OPEN_SLOT);
            let _ = writeln!(out, "{slot}. {occupant}");
        }

        if !roster.waiting_list().is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "⏳ *Liste d'attente:*");
            for (position, waiting) in roster.waiting_list().iter().enumerate() {
                let _ = writeln!(out, "{}. {waiting}", position + 1);
            }
        }

        let _ = writeln!(out);
        if roster.is_full() {
            out.push_str("✅ *COMPLET !*");
        } else {
            let _ = write!(
                out,
                "💬 _Tape {} {} pour participer_",
                self.command(CommandKind::Join),
                roster.id()
            );
        }
        out
    }

    /// One summary entry per match, in the order given.
    pub fn render_listing(&self, rosters: &[MatchRoster]) -> String {
        if rosters.is_empty() {
            return format!(
                "📋 Aucun match programmé\n\n_Crée un match avec {} [date] [heure]_",
                self.command(CommandKind::CreateMatch)
            );
        }

        let mut out = String::from("📋 *MATCHS PROGRAMMÉS:*\n");
        for roster in rosters {
            let _ = write!(
                out,
                "\n• {} {} ({}/{})\n  ID: {}\n",
                roster.date(),
                roster.time(),
                roster.participants().len(),
                roster.capacity(),
                roster.id()
            );
        }
        out.truncate(out.trim_end().len());
        out
    }

    /// Static command reference.
    pub fn render_help(&self) -> String {
        let create = self.command(CommandKind::CreateMatch);
        format!(
            "🎾 *BOT PADEL - COMMANDES*\n\n\
             {create} [JJ/MM] [heure] - Créer un match\n\
             {} - Voir tous les matchs\n\
             {} [ID] - Rejoindre un match\n\
             {} [ID] - Quitter un match\n\
             {} [ID] - Annuler (créateur only)\n\
             {} - Afficher cette aide\n\n\
             _Exemple: {create} 12/08 18h_",
            self.command(CommandKind::ListMatches),
            self.command(CommandKind::Join),
            self.command(CommandKind::Leave),
            self.command(CommandKind::Cancel),
            self.command(CommandKind::Help),
        )
    }

    /// Usage hint replied when a command misses its arguments.
    pub fn render_usage(&self, kind: CommandKind) -> String {
        let command = self.command(kind);
        match kind {
            CommandKind::CreateMatch => {
                format!("❌ Format: {command} [date] [heure]\nExemple: {command} 12/08 18h")
            }
            CommandKind::Join => format!("❌ Format: {command} [ID]\nExemple: {command} 1234"),
            CommandKind::Leave | CommandKind::Cancel => format!("❌ Format: {command} [ID]"),
            CommandKind::ListMatches | CommandKind::Help => self.render_help(),
        }
    }

    /// Reply to a join request on an existing match.
    pub fn render_join(&self, outcome: &JoinOutcome, roster: &MatchRoster) -> String {
        let headline = match outcome {
            JoinOutcome::Admitted => "Inscrit au match !".to_owned(),
            JoinOutcome::Waitlisted { position } => {
                format!("Ajouté à la liste d'attente (position {position})")
            }
            JoinOutcome::AlreadyJoined => return "❌ Tu es déjà inscrit !".to_owned(),
            JoinOutcome::AlreadyWaitlisted => return "❌ Déjà en liste d'attente".to_owned(),
        };
        format!("✅ {headline}\n\n{}", self.render_roster(roster))
    }

    /// Reply to a join request whose identifier did not resolve.
    pub fn render_join_not_found(&self) -> String {
        format!(
            "❌ Match introuvable. Vérifie l'ID ou tape {}",
            self.command(CommandKind::ListMatches)
        )
    }

    /// Reply to a leave request on an existing match.
    pub fn render_leave(&self, user: &str, outcome: &LeaveOutcome, roster: &MatchRoster) -> String {
        let headline = match outcome {
            LeaveOutcome::LeftAndPromoted { promoted } => {
                format!("{user} a quitté. {promoted} a été promu !")
            }
            LeaveOutcome::Left => format!("{user} a quitté le match"),
            LeaveOutcome::RemovedFromWaitingList => "Retiré de la liste d'attente".to_owned(),
            LeaveOutcome::NotParticipant => {
                return "❌ Tu n'es pas inscrit à ce match".to_owned();
            }
        };
        format!("👋 {headline}\n\n{}", self.render_roster(roster))
    }

    /// Reply to leave or cancel requests whose identifier did not resolve.
    pub fn render_not_found(&self) -> String {
        "❌ Match introuvable".to_owned()
    }

    /// Reply to a cancellation attempt.
    pub fn render_cancel(&self, result: &Result<MatchRoster, CancelError>, requester: &str) -> String {
        match result {
            Ok(roster) => format!("❌ Match {} annulé par {requester}", roster.id()),
            Err(CancelError::NotFound(_)) => self.render_not_found(),
            Err(CancelError::NotAuthorized { .. }) => {
                "❌ Seul le créateur peut annuler le match".to_owned()
            }
        }
    }
}
