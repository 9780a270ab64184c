use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::FrameEvents;
use crate::game::Game;
use crate::level::LevelSource;
use crate::step::step;
use crate::types::*;

/// A recorded session: config, optional level to jump straight into,
/// and one input per frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunInput {
    #[serde(default)]
    pub config: GameConfig,
    #[serde(default)]
    pub start: Option<LevelId>,
    pub transcript: Vec<FrameInput>,
}

/// Totals gathered while replaying a transcript.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub frames: u32,
    pub coins_collected: [u32; 2],
    pub deaths: [u32; 2],
    pub jumps: [u32; 2],
    pub levels_entered: Vec<LevelId>,
    pub levels_completed: Vec<LevelId>,
    pub all_levels_complete: bool,
    pub exit_requested: bool,
}

impl RunSummary {
    pub fn absorb(&mut self, events: &FrameEvents) {
        for i in 0..2 {
            self.coins_collected[i] += events.coins_collected[i];
            self.jumps[i] += u32::from(events.jumped[i]);
        }
        for death in &events.deaths {
            if let Some(slot) = self.deaths.get_mut(usize::from(death.player_num).wrapping_sub(1)) {
                *slot += 1;
            }
        }
        self.levels_entered.extend(events.level_entered);
        self.levels_completed.extend(events.level_completed);
        self.all_levels_complete |= events.all_levels_complete;
        self.exit_requested |= events.exit_requested;
    }
}

/// Feeds `transcript` to the game frame by frame, stopping early once exit
/// is requested.
pub fn replay<S: LevelSource>(game: &mut Game<S>, transcript: &[FrameInput]) -> RunSummary {
    let mut summary = RunSummary::default();
    for input in transcript {
        let events = step(game, input);
        summary.frames += 1;
        summary.absorb(&events);
        if game.exit_requested {
            debug!(frame = game.frame, "exit requested, stopping replay");
            break;
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::{create_game, default_config};

    #[test]
    fn replay_stops_at_exit() {
        let mut game = create_game(default_config(3));
        let mut transcript = vec![FrameInput::IDLE; 10];
        transcript.push(FrameInput::new(0, 0, command::CANCEL));
        transcript.extend(vec![FrameInput::IDLE; 10]);
        let summary = replay(&mut game, &transcript);
        assert_eq!(summary.frames, 11);
        assert!(summary.exit_requested);
        assert_eq!(game.frame, 11);
    }

    #[test]
    fn replay_counts_jumps_and_deaths() {
        let mut game = create_game(default_config(3));
        game.enter_level(LevelId::new(3, 1));
        let mut transcript = vec![FrameInput::IDLE; 20];
        transcript.push(FrameInput::new(button::JUMP, 0, 0));
        transcript.extend(vec![FrameInput::IDLE; 40]);
        let summary = replay(&mut game, &transcript);
        assert_eq!(summary.jumps, [1, 0]);
        assert_eq!(summary.deaths, [0, 0]);
        assert!(!summary.exit_requested);
        assert_eq!(summary.frames, 61);
    }

    #[test]
    fn run_input_defaults() {
        let run: RunInput = serde_json::from_str(r#"{"transcript":[{"players":[{"buttons":2},{"buttons":0}]}]}"#).unwrap();
        assert_eq!(run.config, GameConfig::default());
        assert_eq!(run.start, None);
        assert_eq!(run.transcript.len(), 1);
        assert!(run.transcript[0].players[0].right());
        assert_eq!(run.transcript[0].commands, 0);
    }
}
