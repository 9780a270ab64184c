//! Generates run JSON files for the host.
//!
//! Usage:
//!   cargo run -p tandem-core --example gen-transcript -- [idle|walk|hop|quit] > run.json

use tandem_core::*;

fn main() {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "idle".to_string());

    let config = default_config(42);
    let start = LevelId::new(3, 1);

    let (start, transcript): (Option<LevelId>, Vec<FrameInput>) = match mode.as_str() {
        "idle" => {
            // Both players stand at their spawns for ten seconds
            (Some(start), vec![FrameInput::IDLE; 600])
        }
        "walk" => {
            // Both walk right along the floor into the first spike island
            (
                Some(start),
                vec![FrameInput::new(button::RIGHT, button::RIGHT, 0); 300],
            )
        }
        "hop" => {
            // Player 1 hops in place every half second, player 2 waits
            let transcript = (0..600)
                .map(|tick| {
                    let p1 = if tick % 30 == 0 { button::JUMP } else { 0 };
                    FrameInput::new(p1, 0, 0)
                })
                .collect();
            (Some(start), transcript)
        }
        "quit" => {
            // Hub only: idle a moment, then leave
            let mut transcript = vec![FrameInput::IDLE; 60];
            transcript.push(FrameInput::new(0, 0, command::CANCEL));
            (None, transcript)
        }
        _ => {
            eprintln!("Unknown mode: {}. Use 'idle', 'walk', 'hop', or 'quit'", mode);
            std::process::exit(1);
        }
    };

    // Verify by running the sim
    let mut game = create_game(config.clone());
    if let Some(id) = start {
        game.enter_level(id);
    }
    let summary = replay(&mut game, &transcript);

    eprintln!("=== Sim result ({} mode) ===", mode);
    eprintln!("Frames: {}", summary.frames);
    eprintln!(
        "Coins: P1={}, P2={}",
        summary.coins_collected[0], summary.coins_collected[1]
    );
    eprintln!("Deaths: P1={}, P2={}", summary.deaths[0], summary.deaths[1]);
    eprintln!("Exit requested: {}", summary.exit_requested);

    let input = RunInput {
        config,
        start,
        transcript,
    };

    println!("{}", serde_json::to_string(&input).unwrap());
}
