use std::collections::HashSet;
use std::io::Write;

use common::engine::{RenderFrame, RenderSink};
use common::game::{Point, RunPhase};

const EMPTY: char = '.';
const FOOD: char = 'o';
const WEAPON: char = '*';
const PLAYER_HEAD: char = '@';
const PLAYER_BODY: char = '#';
const NPC_HEAD: char = 'X';
const NPC_BODY: char = 'x';

/// Draws each frame as a character grid on stdout. Thin by design; the
/// simulation neither knows nor cares what this looks like.
pub struct TerminalRenderer {
    clear_screen: bool,
}

impl TerminalRenderer {
    pub fn new(clear_screen: bool) -> Self {
        Self { clear_screen }
    }
}

impl RenderSink for TerminalRenderer {
    fn present(&mut self, frame: &RenderFrame) {
        let mut out = String::new();
        if self.clear_screen {
            out.push_str("\x1b[2J\x1b[H");
        }
        out.push_str(&render_to_string(frame));
        print!("{}", out);
        let _ = std::io::stdout().flush();
    }
}

pub fn render_to_string(frame: &RenderFrame) -> String {
    let foods: HashSet<Point> = frame.foods.iter().copied().collect();
    let weapons: HashSet<Point> = frame.weapons.iter().copied().collect();
    let player_head = frame.player.first().copied();
    let player_body: HashSet<Point> = frame.player.iter().skip(1).copied().collect();
    let npc_head = frame.npc.first().copied();
    let npc_body: HashSet<Point> = frame.npc.iter().skip(1).copied().collect();

    let mut out = String::new();
    out.push_str(&format!(
        "SCORE {:03}  TICK {}  NPC {}\n",
        frame.score,
        frame.tick,
        if !frame.npc_enabled {
            "off"
        } else if frame.npc_alive {
            "alive"
        } else {
            "banished"
        }
    ));

    for y in 0..frame.grid.height {
        for x in 0..frame.grid.width {
            let cell = Point::new(x, y);
            let ch = if player_head == Some(cell) {
                PLAYER_HEAD
            } else if player_body.contains(&cell) {
                PLAYER_BODY
            } else if npc_head == Some(cell) {
                NPC_HEAD
            } else if npc_body.contains(&cell) {
                NPC_BODY
            } else if weapons.contains(&cell) {
                WEAPON
            } else if foods.contains(&cell) {
                FOOD
            } else {
                EMPTY
            };
            out.push(ch);
        }
        out.push('\n');
    }

    if let RunPhase::Ended { final_score } = frame.phase {
        out.push_str(&format!(
            "GAME OVER - final score {:03} (type 'start' to play again)\n",
            final_score
        ));
    }
    out
}
