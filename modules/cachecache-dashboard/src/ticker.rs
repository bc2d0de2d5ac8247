//! Human-readable one-liners for the event ticker.

use cachecache_common::GameEvent;

/// Format an event for the ticker. Keep-alives produce nothing.
pub fn describe(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::NewGame { .. } => Some("Game started.".to_string()),
        GameEvent::Hider { hider, place, .. } => {
            let hider = hider.as_deref().unwrap_or("someone");
            Some(format!("Ooh, {hider} is hidden in {place}."))
        }
        GameEvent::SeekerMove { seeker, destination, .. } => {
            let seeker = seeker.as_deref().unwrap_or("The seeker");
            Some(format!("{seeker} went to {destination}."))
        }
        GameEvent::PlayerDiscovered { seeker, hider, place, .. } => {
            let seeker = seeker.as_deref().unwrap_or("The seeker");
            let hider = hider.as_deref().unwrap_or("a hider");
            Some(format!("{seeker} found {hider} in {place}."))
        }
        GameEvent::GameOver { seeker_won, .. } => {
            let verb = if *seeker_won { "won" } else { "lost" };
            Some(format!("Game over. The seeker {verb}!"))
        }
        GameEvent::Ping => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn formats_each_kind() {
        let new_game = GameEvent::NewGame {
            game_id: None,
            seeker: Some("Fred".into()),
            hiders: HashMap::new(),
        };
        assert_eq!(describe(&new_game).unwrap(), "Game started.");

        let hider = GameEvent::Hider {
            game_id: None,
            hider: Some("alice".into()),
            place: "Louvre".into(),
        };
        assert_eq!(describe(&hider).unwrap(), "Ooh, alice is hidden in Louvre.");

        let moved = GameEvent::SeekerMove {
            game_id: None,
            seeker: Some("Fred".into()),
            place: "Louvre".into(),
            destination: "Panthéon".into(),
            distance: None,
            duration: 2000.0,
        };
        assert_eq!(describe(&moved).unwrap(), "Fred went to Panthéon.");

        let found = GameEvent::PlayerDiscovered {
            game_id: None,
            seeker: Some("Fred".into()),
            hider: Some("alice".into()),
            place: "Louvre".into(),
        };
        assert_eq!(describe(&found).unwrap(), "Fred found alice in Louvre.");

        let over = GameEvent::GameOver {
            game_id: None,
            seeker_won: true,
            non_discovered_players: None,
        };
        assert_eq!(describe(&over).unwrap(), "Game over. The seeker won!");
    }

    #[test]
    fn pings_stay_off_the_ticker() {
        assert!(describe(&GameEvent::Ping).is_none());
    }

    #[test]
    fn missing_names_get_fallbacks() {
        let found = GameEvent::PlayerDiscovered {
            game_id: None,
            seeker: None,
            hider: None,
            place: "Louvre".into(),
        };
        assert_eq!(describe(&found).unwrap(), "The seeker found a hider in Louvre.");
    }
}
