use std::slice;

use tracing::info;

use crate::death::DeathCause;
use crate::events::{DeathEvent, FrameEvents};
use crate::game::{Game, GameMode};
use crate::level::LevelSource;
use crate::player::{Player, PlayerFrame, Surroundings};
use crate::prng::Rng;
use crate::types::*;

/// Advances the game by one frame.
///
/// Sub-step order:
///  0. Early return once exit has been requested
///  1. First applicable command: cancel, confirm, restart, next
///  2. Hub: update player 1 then player 2 on the hub map, refresh portals
///  3. Playing (skipped once the level is complete):
///     a. Update player 1 then player 2 against platforms, coins, each other
///     b. Spike check for every player not already dying
///     c. Spin coins
///     d. Win check
///     e. Door mirrors "no coins left"
///  4. Advance frame counter
pub fn step<S: LevelSource>(game: &mut Game<S>, input: &FrameInput) -> FrameEvents {
    let mut events = FrameEvents::default();

    // 0. Nothing runs after exit
    if game.exit_requested {
        events.exit_requested = true;
        return events;
    }

    // 1. Commands
    apply_commands(game, input, &mut events);
    if game.exit_requested {
        game.frame += 1;
        return events;
    }

    match &mut game.mode {
        // 2. Hub
        GameMode::HubSelect(hub) => {
            let mut no_coins = Vec::new();
            update_players(
                &mut game.players,
                &input.players,
                &hub.platforms,
                &mut no_coins,
                &game.config,
                &mut game.rng,
                &mut events,
            );
            hub.update_portals(&game.players);
        }
        // 3. Playing
        GameMode::Playing(play) if !play.level_complete => {
            let session = &mut play.session;

            // a. Players
            update_players(
                &mut game.players,
                &input.players,
                &session.platforms,
                &mut session.coins,
                &game.config,
                &mut game.rng,
                &mut events,
            );

            // b. Hazards
            for player in game.players.iter_mut() {
                if player.is_dying() {
                    continue;
                }
                if session.spikes.iter().any(|s| s.rect.overlaps(&player.rect)) {
                    player.start_death(DeathCause::Spike);
                    events.deaths.push(DeathEvent {
                        player_num: player.player_num,
                        cause: DeathCause::Spike,
                    });
                }
            }

            // c. Coins
            for coin in session.coins.iter_mut() {
                coin.spin();
            }

            // d. Win
            let goal = session.goal.rect;
            if session.all_coins_collected() && game.players.iter().all(|p| p.rect.overlaps(&goal)) {
                play.level_complete = true;
                events.level_completed = Some(session.id);
                info!(level = %session.id, "level complete");
            }

            // e. Door
            session.goal.door_open = session.all_coins_collected();
        }
        GameMode::Playing(_) => {}
    }

    // 4. Frame
    game.frame += 1;
    events
}

fn apply_commands<S: LevelSource>(game: &mut Game<S>, input: &FrameInput, events: &mut FrameEvents) {
    if input.has(command::CANCEL) {
        if game.is_playing() {
            game.return_to_hub();
            events.returned_to_hub = true;
        } else {
            info!("exit requested");
            game.exit_requested = true;
            events.exit_requested = true;
        }
    } else if input.has(command::CONFIRM) {
        events.level_entered = game.try_enter_selected();
    } else if input.has(command::RESTART) {
        events.level_entered = game.restart();
    } else if input.has(command::NEXT) {
        events.level_entered = game.next_level();
        events.all_levels_complete = game.all_levels_complete;
    }
}

/// Player 1 moves first; player 2 then collides with player 1's new position.
fn update_players(
    players: &mut [Player; 2],
    inputs: &[PlayerInput; 2],
    platforms: &[Platform],
    coins: &mut Vec<Coin>,
    config: &GameConfig,
    rng: &mut Rng,
    events: &mut FrameEvents,
) {
    let [p1, p2] = players;
    let f1 = p1.update(
        &inputs[0],
        Surroundings {
            platforms,
            others: slice::from_ref(&*p2),
            coins: &mut *coins,
            config,
        },
        rng,
    );
    record(events, 0, p1.player_num, f1);
    let f2 = p2.update(
        &inputs[1],
        Surroundings {
            platforms,
            others: slice::from_ref(&*p1),
            coins: &mut *coins,
            config,
        },
        rng,
    );
    record(events, 1, p2.player_num, f2);
}

fn record(events: &mut FrameEvents, idx: usize, player_num: u8, frame: PlayerFrame) {
    events.coins_collected[idx] += frame.coins_collected;
    events.jumped[idx] |= frame.jumped;
    events.respawned[idx] |= frame.respawned;
    if let Some(cause) = frame.died {
        events.deaths.push(DeathEvent { player_num, cause });
    }
}
